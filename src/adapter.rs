use std::sync::Arc;

use ethers::prelude::SignerMiddleware;
use ethers::providers::{Middleware, Provider};
use ethers::signers::{Signer, Wallet};
use ethers::types::Address;
use reqwest::Url;
use tracing::{info, warn};

use crate::cli::PrivateKey;
use crate::common_keys::RpcSigner;
use crate::networks::NetworkSet;

/// Binds a signing wallet to a concrete network endpoint. One instance is
/// constructed per process over the supported network set; it stays unbound
/// until [`EthersAdapter::connect`] is called.
#[derive(Debug)]
pub struct EthersAdapter {
    networks: NetworkSet,
}

pub struct Connection {
    pub signer: RpcSigner,
    pub wallet_address: Address,
    pub initial_nonce: u64,
}

impl EthersAdapter {
    pub fn new(networks: NetworkSet) -> Self {
        Self { networks }
    }

    pub fn networks(&self) -> &NetworkSet {
        &self.networks
    }

    pub async fn connect(
        &self,
        rpc_url: &Url,
        private_key: &PrivateKey,
    ) -> eyre::Result<Connection> {
        let provider = Provider::try_from(rpc_url.as_str())?;
        let chain_id = provider.get_chainid().await?.as_u64();

        match self.networks.for_chain_id(chain_id) {
            Some(chain) => info!("Connected to {chain}"),
            None => {
                warn!("Chain id {chain_id} is not in the supported network set")
            }
        }

        let wallet =
            Wallet::from(private_key.key.clone()).with_chain_id(chain_id);

        let wallet_address = wallet.address();

        let signer = SignerMiddleware::new(provider, wallet);

        let initial_nonce = signer
            .get_transaction_count(wallet_address, None)
            .await?
            .as_u64();

        Ok(Connection {
            signer: RpcSigner(Arc::new(signer)),
            wallet_address,
            initial_nonce,
        })
    }
}
