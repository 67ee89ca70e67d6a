use std::sync::Arc;

use tracing::instrument;

use crate::config::Config;
use crate::deployment::recipe::{MARKETPLACE_UNIT, NFT_UNIT};
use crate::deployment::DeploymentContext;
use crate::plan::DeploymentResult;
use crate::report::Report;
use crate::serde_utils;

pub const REPORT_PATH: &str = "report.yml";

#[instrument(skip_all)]
pub async fn assemble_report(
    context: Arc<DeploymentContext>,
    config: Arc<Config>,
    result: &DeploymentResult,
) -> eyre::Result<()> {
    let report = Report {
        config: config.as_ref().clone(),
        nft: result.get(NFT_UNIT).cloned(),
        marketplace: result.get(MARKETPLACE_UNIT).cloned(),
    };

    let path = context.deployment_dir.join(REPORT_PATH);
    serde_utils::write_serialize(path, report).await?;

    Ok(())
}
