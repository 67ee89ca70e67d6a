use crate::forge_utils::ContractSpec;
use crate::plan::{DeploymentPlan, DeploymentUnit};

pub const NFT_UNIT: &str = "ArtBidexNFT";
pub const MARKETPLACE_UNIT: &str = "ArtBidexMarketplace";

/// The ArtBidex recipe: both contracts, no constructor arguments, and no
/// declared dependency between them.
pub fn artbidex_plan() -> DeploymentPlan {
    DeploymentPlan::new()
        .with_unit(DeploymentUnit::new(
            NFT_UNIT,
            ContractSpec::name(NFT_UNIT),
        ))
        .with_unit(DeploymentUnit::new(
            MARKETPLACE_UNIT,
            ContractSpec::name(MARKETPLACE_UNIT),
        ))
}
