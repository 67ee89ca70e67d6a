use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use reqwest::Url;

pub mod private_key;

pub use private_key::PrivateKey;

#[derive(Debug, Clone, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum DeploymentType {
    /// Deploy both contracts and generate ABI bindings
    Full,
    /// Deploy only the NFT contract
    Nft,
    /// Deploy only the marketplace contract
    Marketplace,
    /// Only generate ABI bindings, without deploying
    Bindings,
}

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    #[clap(short, long, env, default_value = "full")]
    pub target: DeploymentType,

    /// Path to the deployment configuration file
    #[clap(short, long, env)]
    pub config: Option<PathBuf>,

    /// The name of the deployment
    ///
    /// Should be something meaningful like 'prod-2025-08-06'
    #[clap(short, long, env)]
    pub deployment_name: Option<String>,

    /// Private key to use for the deployment
    #[clap(short, long, env)]
    pub private_key: Option<PrivateKey>,

    /// The RPC Url to use for the deployment
    #[clap(short, long, env)]
    pub rpc_url: Option<Url>,

    /// The etherscan API key to use
    #[clap(short, long, env)]
    pub etherscan_api_key: Option<String>,
}
