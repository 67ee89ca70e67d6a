use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::ChainId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Mainnet,
    Arbitrum,
    Sepolia,
    PolygonAmoy,
    Hardhat,
}

/// One supported chain: id, display name and its default RPC endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSpec {
    pub network: Network,
    pub chain_id: ChainId,
    pub display_name: String,
    pub rpc_urls: Vec<String>,
}

impl ChainSpec {
    fn new(
        network: Network,
        chain_id: u64,
        display_name: &str,
        rpc_urls: &[&str],
    ) -> Self {
        Self {
            network,
            chain_id: ChainId(chain_id),
            display_name: display_name.to_string(),
            rpc_urls: rpc_urls.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn default_rpc_url(&self) -> Option<&str> {
        self.rpc_urls.first().map(String::as_str)
    }
}

impl fmt::Display for ChainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (chain id {})", self.display_name, self.chain_id)
    }
}

/// The ordered set of chains a deployment may target. Always non-empty,
/// assembled once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSet {
    chains: Vec<ChainSpec>,
}

impl NetworkSet {
    pub fn new(chains: Vec<ChainSpec>) -> eyre::Result<Self> {
        eyre::ensure!(
            !chains.is_empty(),
            "network set must contain at least one chain"
        );

        Ok(Self { chains })
    }

    pub fn supported() -> Self {
        Self {
            chains: vec![
                ChainSpec::new(
                    Network::Mainnet,
                    1,
                    "Ethereum",
                    &["https://cloudflare-eth.com"],
                ),
                ChainSpec::new(
                    Network::Arbitrum,
                    42161,
                    "Arbitrum One",
                    &["https://arb1.arbitrum.io/rpc"],
                ),
                ChainSpec::new(
                    Network::Sepolia,
                    11155111,
                    "Sepolia",
                    &["https://rpc.sepolia.org"],
                ),
                ChainSpec::new(
                    Network::PolygonAmoy,
                    80002,
                    "Polygon Amoy",
                    &["https://rpc-amoy.polygon.technology"],
                ),
                ChainSpec::new(
                    Network::Hardhat,
                    31337,
                    "Hardhat",
                    &["http://127.0.0.1:8545"],
                ),
            ],
        }
    }

    pub fn chains(&self) -> &[ChainSpec] {
        &self.chains
    }

    pub fn for_chain_id(&self, chain_id: u64) -> Option<&ChainSpec> {
        self.chains
            .iter()
            .find(|chain| chain.chain_id == ChainId(chain_id))
    }

    pub fn for_rpc_url(&self, rpc_url: &str) -> Option<&ChainSpec> {
        self.chains
            .iter()
            .find(|chain| chain.rpc_urls.iter().any(|url| url == rpc_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_set_holds_five_chains_in_declared_order() {
        let networks = NetworkSet::supported();

        let declared: Vec<_> = networks
            .chains()
            .iter()
            .map(|chain| chain.network)
            .collect();

        assert_eq!(
            declared,
            vec![
                Network::Mainnet,
                Network::Arbitrum,
                Network::Sepolia,
                Network::PolygonAmoy,
                Network::Hardhat,
            ]
        );
    }

    #[test]
    fn chain_ids_match_the_networks() {
        let networks = NetworkSet::supported();

        assert_eq!(networks.for_chain_id(1).unwrap().network, Network::Mainnet);
        assert_eq!(
            networks.for_chain_id(80002).unwrap().network,
            Network::PolygonAmoy
        );
        assert_eq!(
            networks.for_chain_id(31337).unwrap().network,
            Network::Hardhat
        );
        assert!(networks.for_chain_id(5).is_none());
    }

    #[test]
    fn empty_sets_are_rejected() {
        assert!(NetworkSet::new(vec![]).is_err());
    }

    #[test]
    fn every_chain_has_a_default_endpoint() {
        for chain in NetworkSet::supported().chains() {
            assert!(chain.default_rpc_url().is_some(), "{}", chain.network);
        }
    }
}
