use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::deployment::recipe::{MARKETPLACE_UNIT, NFT_UNIT};
use crate::report::contract_deployment::ContractDeployment;

pub mod contract_deployment;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub config: Config,

    #[serde(default)]
    pub nft: Option<ContractDeployment>,

    #[serde(default)]
    pub marketplace: Option<ContractDeployment>,
}

impl Report {
    pub fn default_with_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
            nft: None,
            marketplace: None,
        }
    }

    pub fn deployment(&self, unit: &str) -> Option<&ContractDeployment> {
        match unit {
            NFT_UNIT => self.nft.as_ref(),
            MARKETPLACE_UNIT => self.marketplace.as_ref(),
            _ => None,
        }
    }

    pub fn record(
        &mut self,
        unit: &str,
        deployment: ContractDeployment,
    ) -> eyre::Result<()> {
        match unit {
            NFT_UNIT => self.nft = Some(deployment),
            MARKETPLACE_UNIT => self.marketplace = Some(deployment),
            other => eyre::bail!("no report slot for deployment unit {other}"),
        }

        Ok(())
    }
}
