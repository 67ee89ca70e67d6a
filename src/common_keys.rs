use std::fmt;
use std::sync::Arc;

use ethers::prelude::*;

// TODO: Allow for different wallet kinds
#[derive(Clone)]
pub struct RpcSigner(pub Arc<SignerMiddleware<Provider<Http>, LocalWallet>>);

impl fmt::Debug for RpcSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RpcSigner(..)")
    }
}
