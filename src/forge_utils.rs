pub mod common;
pub mod create;
pub mod inspect_abi;

pub use common::ContractSpec;
pub use create::{ForgeCreate, ForgeOutput};
pub use inspect_abi::ForgeInspectAbi;
