use tracing::{info, instrument};

use crate::config::Config;
use crate::forge_utils::ForgeInspectAbi;
use crate::plan::DeploymentPlan;

/// Writes each contract's ABI under the configured types directory, the
/// counterpart of the original toolchain's generated-types output.
#[instrument(skip_all)]
pub async fn generate_abi_bindings(
    config: &Config,
    plan: &DeploymentPlan,
) -> eyre::Result<()> {
    tokio::fs::create_dir_all(&config.compiler.types_dir).await?;

    for unit in plan.units() {
        let abi = ForgeInspectAbi::new(unit.contract.clone())
            .with_cwd(&config.contracts.dir)
            .run()
            .await?;

        let path = config
            .compiler
            .types_dir
            .join(format!("{}.json", unit.name));

        tokio::fs::write(&path, serde_json::to_string_pretty(&abi)?).await?;

        info!("Wrote {} ABI to {}", unit.name, path.display());
    }

    Ok(())
}
