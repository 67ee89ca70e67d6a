use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod adapter;
pub mod cli;
pub mod common_keys;
pub mod config;
pub mod forge_utils;
pub mod networks;
pub mod plan;
pub mod report;
pub mod serde_utils;
pub mod types;

mod deployment;
mod interactive;

async fn start() -> eyre::Result<()> {
    let args = cli::Args::parse();

    let cmd = interactive::run_interactive_session(args).await?;

    deployment::run_deployment(cmd).await
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    dotenv::dotenv().ok();

    let indicatif_layer = IndicatifLayer::new();

    let filter = EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    match start().await {
        Ok(()) => Ok(()),
        Err(err) => {
            let report = eyre::ErrReport::from(err);
            tracing::error!("{:?}", report);
            std::process::exit(1)
        }
    }
}
