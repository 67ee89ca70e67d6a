use reqwest::Url;

use crate::config::Config;
use crate::deployment::recipe::{MARKETPLACE_UNIT, NFT_UNIT};
use crate::networks::NetworkSet;
use crate::plan::DeploymentPlan;
use crate::report::Report;

/// The home view: the title followed by the connection, actions and info
/// sections, always in that order. Rendering owns no state of its own, so
/// the ordering is testable without a terminal.
pub fn render_home(
    config: &Config,
    networks: &NetworkSet,
    rpc_url: &Url,
    plan: &DeploymentPlan,
    report: Option<&Report>,
) -> String {
    let mut out = String::new();

    out.push_str("ArtBidex\n");
    out.push_str(&render_connection(networks, rpc_url));
    out.push_str(&render_actions(plan));
    out.push_str(&render_info(config, networks, report));

    out
}

fn render_connection(networks: &NetworkSet, rpc_url: &Url) -> String {
    let network = networks
        .for_rpc_url(rpc_url.as_str().trim_end_matches('/'))
        .map(|chain| chain.to_string())
        .unwrap_or_else(|| "(custom endpoint)".to_string());

    format!("Connection:\n  Network: {network}\n  Rpc: {rpc_url}\n")
}

fn render_actions(plan: &DeploymentPlan) -> String {
    let mut out = String::from("Actions:\n");

    for unit in plan.units() {
        out.push_str(&format!("  Deploy {}\n", unit.name));
    }

    out.push_str("  Generate ABI bindings\n");

    out
}

fn render_info(
    config: &Config,
    networks: &NetworkSet,
    report: Option<&Report>,
) -> String {
    let mut out = String::from("Info:\n");

    out.push_str(&format!("  Project id: {}\n", config.app.project_id));
    out.push_str(&format!("  Solc: {}\n", config.compiler.solc_version));

    out.push_str("  Networks:\n");
    for chain in networks.chains() {
        out.push_str(&format!("    {chain}\n"));
    }

    out.push_str("  Contracts:\n");
    for (name, deployment) in [
        (NFT_UNIT, report.and_then(|report| report.nft.as_ref())),
        (
            MARKETPLACE_UNIT,
            report.and_then(|report| report.marketplace.as_ref()),
        ),
    ] {
        match deployment {
            Some(deployment) => out
                .push_str(&format!("    {name}: {:?}\n", deployment.address)),
            None => out.push_str(&format!("    {name}: (undeployed)\n")),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use ethers::types::{Address, H256};
    use indoc::indoc;

    use super::*;
    use crate::config::{AppConfig, ProjectId};
    use crate::deployment::recipe;
    use crate::report::contract_deployment::ContractDeployment;

    fn test_config() -> Config {
        Config {
            app: AppConfig {
                project_id: ProjectId::new("deadbeef").unwrap(),
            },
            compiler: Default::default(),
            contracts: Default::default(),
        }
    }

    fn hardhat_url() -> Url {
        "http://127.0.0.1:8545".parse().unwrap()
    }

    fn section_headers(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|line| !line.starts_with(' ') && *line != "ArtBidex")
            .collect()
    }

    #[test]
    fn title_comes_first_then_three_sections() {
        let rendered = render_home(
            &test_config(),
            &NetworkSet::supported(),
            &hardhat_url(),
            &recipe::artbidex_plan(),
            None,
        );

        assert_eq!(rendered.lines().next(), Some("ArtBidex"));
        assert_eq!(
            section_headers(&rendered),
            vec!["Connection:", "Actions:", "Info:"]
        );
    }

    #[test]
    fn section_order_does_not_depend_on_report_state() {
        let config = test_config();
        let networks = NetworkSet::supported();
        let plan = recipe::artbidex_plan();

        let report = Report {
            config: config.clone(),
            nft: Some(ContractDeployment {
                address: Address::from_low_u64_be(7),
                transaction_hash: H256::from_low_u64_be(7),
            }),
            marketplace: None,
        };

        let without_report =
            render_home(&config, &networks, &hardhat_url(), &plan, None);
        let with_report = render_home(
            &config,
            &networks,
            &hardhat_url(),
            &plan,
            Some(&report),
        );

        assert_eq!(
            section_headers(&without_report),
            section_headers(&with_report)
        );
    }

    #[test]
    fn connection_names_a_known_endpoint() {
        let rendered =
            render_connection(&NetworkSet::supported(), &hardhat_url());

        assert_eq!(
            rendered,
            indoc! {"
                Connection:
                  Network: Hardhat (chain id 31337)
                  Rpc: http://127.0.0.1:8545/
            "}
        );
    }

    #[test]
    fn connection_marks_unknown_endpoints() {
        let rendered = render_connection(
            &NetworkSet::supported(),
            &"http://10.0.0.1:8545".parse().unwrap(),
        );

        assert!(rendered.contains("(custom endpoint)"));
    }

    #[test]
    fn actions_list_the_recipe_units() {
        let rendered = render_actions(&recipe::artbidex_plan());

        assert_eq!(
            rendered,
            indoc! {"
                Actions:
                  Deploy ArtBidexNFT
                  Deploy ArtBidexMarketplace
                  Generate ABI bindings
            "}
        );
    }

    #[test]
    fn info_marks_undeployed_contracts() {
        let rendered =
            render_info(&test_config(), &NetworkSet::supported(), None);

        assert!(rendered.contains("ArtBidexNFT: (undeployed)"));
        assert!(rendered.contains("ArtBidexMarketplace: (undeployed)"));
        assert!(rendered.contains("Ethereum (chain id 1)"));
    }
}
