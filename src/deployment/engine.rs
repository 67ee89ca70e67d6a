use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::steps::assemble_report::REPORT_PATH;
use super::DeploymentContext;
use crate::config::Config;
use crate::plan::{DeployEngine, DeploymentUnit};
use crate::report::contract_deployment::ContractDeployment;
use crate::report::Report;
use crate::serde_utils;

/// Executes deployment units through `forge create`. Units already recorded
/// in the deployment's report are skipped and their recorded handle returned,
/// so re-running a deployment is idempotent. Each success is persisted to the
/// report immediately, which is what makes the skip possible on a later run.
pub struct ForgeEngine {
    context: Arc<DeploymentContext>,
    config: Arc<Config>,
    progress: Mutex<Report>,
}

impl ForgeEngine {
    pub fn new(context: Arc<DeploymentContext>, config: Arc<Config>) -> Self {
        let progress = Mutex::new(context.report.clone());

        Self {
            context,
            config,
            progress,
        }
    }
}

#[async_trait]
impl DeployEngine for ForgeEngine {
    async fn instantiate(
        &self,
        unit: &DeploymentUnit,
        constructor_args: &[String],
    ) -> eyre::Result<ContractDeployment> {
        if let Some(previous) =
            self.progress.lock().await.deployment(&unit.name)
        {
            info!("Existing {} deployment found. Skipping.", unit.name);
            return Ok(previous.clone());
        }

        let mut forge_create = self
            .context
            .forge_create(unit.contract.clone())
            .with_cwd(&self.config.contracts.dir)
            .with_use_solc(&self.config.compiler.solc_version);

        for arg in constructor_args {
            forge_create = forge_create.with_constructor_arg(arg);
        }

        let output = forge_create.run().await?;
        let deployment = ContractDeployment::from(output);

        let mut progress = self.progress.lock().await;
        progress.record(&unit.name, deployment.clone())?;

        serde_utils::write_serialize(
            self.context.deployment_dir.join(REPORT_PATH),
            &*progress,
        )
        .await?;

        Ok(deployment)
    }
}
