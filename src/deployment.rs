use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use ethers::providers::Middleware;
use ethers::utils::format_ether;
use tracing::info;

use self::engine::ForgeEngine;
use self::steps::assemble_report::{self, REPORT_PATH};
use crate::adapter::EthersAdapter;
use crate::cli::DeploymentType;
use crate::config::Config;
use crate::networks::NetworkSet;
use crate::report::Report;
use crate::serde_utils;

pub mod cmd;
pub mod deployment_context;
pub mod engine;
pub mod recipe;
pub mod steps;

pub use self::cmd::Cmd;
pub use self::deployment_context::DeploymentContext;

pub async fn run_deployment(cmd: Cmd) -> eyre::Result<()> {
    let config: Config = serde_utils::read_deserialize(&cmd.config).await?;

    let plan = recipe::artbidex_plan();

    let plan = match &cmd.target {
        DeploymentType::Full => plan,
        DeploymentType::Nft => plan.restricted_to(recipe::NFT_UNIT)?,
        DeploymentType::Marketplace => {
            plan.restricted_to(recipe::MARKETPLACE_UNIT)?
        }
        DeploymentType::Bindings => {
            return steps::bindings::generate_abi_bindings(&config, &plan)
                .await;
        }
    };

    // The config validated, so the process-wide adapter may now exist.
    let adapter = EthersAdapter::new(NetworkSet::supported());

    let deployment_dir = PathBuf::from(&cmd.deployment_name);

    tokio::fs::create_dir_all(&deployment_dir).await?;

    let connection = adapter.connect(&cmd.rpc_url, &cmd.private_key).await?;

    let balance = connection
        .signer
        .0
        .get_balance(connection.wallet_address, None)
        .await?;

    info!(
        "Deployer {:?} balance: {}",
        connection.wallet_address,
        format_ether(balance)
    );

    let report_path = deployment_dir.join(REPORT_PATH);
    let report = if report_path.exists() {
        serde_utils::read_deserialize::<Report>(&report_path).await?
    } else {
        Report::default_with_config(&config)
    };

    let context = DeploymentContext {
        deployment_dir,
        nonce: AtomicU64::new(connection.initial_nonce),
        report,
        private_key: cmd.private_key.clone(),
        rpc_url: cmd.rpc_url.clone(),
        etherscan_api_key: cmd.etherscan_api_key.clone(),
    };

    let context = Arc::new(context);
    let config = Arc::new(config);

    let engine = ForgeEngine::new(context.clone(), config.clone());

    let result = plan.execute(&engine).await?;

    assemble_report::assemble_report(context, config.clone(), &result).await?;

    if let DeploymentType::Full = cmd.target {
        steps::bindings::generate_abi_bindings(&config, &plan).await?;
    }

    Ok(())
}
