use std::path::PathBuf;

use reqwest::Url;

use crate::cli::{DeploymentType, PrivateKey};

/// A fully resolved invocation, produced by the interactive session.
#[derive(Debug, Clone)]
pub struct Cmd {
    pub config: PathBuf,
    pub deployment_name: String,
    pub private_key: PrivateKey,
    pub rpc_url: Url,
    pub etherscan_api_key: Option<String>,
    pub target: DeploymentType,
}

impl Cmd {
    pub fn new(
        config: PathBuf,
        deployment_name: String,
        private_key: PrivateKey,
        rpc_url: Url,
        etherscan_api_key: Option<String>,
        target: DeploymentType,
    ) -> Self {
        Self {
            config,
            deployment_name,
            private_key,
            rpc_url,
            etherscan_api_key,
            target,
        }
    }
}
