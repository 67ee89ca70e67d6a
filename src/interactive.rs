use std::path::PathBuf;

use reqwest::Url;

use self::utils::prompt_text_handle_errors;
use crate::cli::Args;
use crate::config::{AppConfig, Config, ProjectId};
use crate::deployment::steps::assemble_report::REPORT_PATH;
use crate::deployment::{recipe, Cmd};
use crate::networks::NetworkSet;
use crate::report::Report;
use crate::serde_utils;

mod home;
mod utils;

#[derive(Clone, Debug, derive_more::Display)]
enum MainMenu {
    #[display(fmt = "Proceed")]
    Proceed,
    #[display(fmt = "Switch network")]
    SwitchNetwork,
}

pub async fn run_interactive_session(cmd: Args) -> eyre::Result<Cmd> {
    let config_path = if let Some(config) = cmd.config.as_ref() {
        println!("Using config at: {}", config.display());
        config.clone()
    } else {
        let config_path =
            inquire::Text::new("Path to config (leave empty to create):")
                .prompt()?;

        if config_path.trim().is_empty() {
            create_config_interactive().await?
        } else {
            config_path.parse()?
        }
    };

    // An invalid project id aborts here, before anything else is set up.
    let config: Config = serde_utils::read_deserialize(&config_path).await?;

    let networks = NetworkSet::supported();

    let deployment_name = if let Some(name) = cmd.deployment_name.as_ref() {
        println!("Currently working on deployment: {}", name);
        name.clone()
    } else {
        inquire::Text::new("Deployment name:").prompt()?
    };

    let private_key = if let Some(private_key) = cmd.private_key.as_ref() {
        println!("Using private key: {private_key}");
        private_key.clone()
    } else {
        prompt_text_handle_errors("Private key:")?
    };

    let mut rpc_url = if let Some(rpc_url) = cmd.rpc_url.as_ref() {
        println!("Using RPC: {rpc_url}");
        rpc_url.clone()
    } else {
        select_rpc_url(&networks)?
    };

    let etherscan_api_key =
        if let Some(etherscan_api_key) = cmd.etherscan_api_key.as_ref() {
            println!("Using Etherscan API key: {etherscan_api_key}");
            Some(etherscan_api_key.clone())
        } else {
            let etherscan_api_key =
                inquire::Text::new("Etherscan API key (leave empty to skip):")
                    .prompt()?;

            if etherscan_api_key.trim().is_empty() {
                None
            } else {
                Some(etherscan_api_key)
            }
        };

    let plan = recipe::artbidex_plan();

    loop {
        let deployment_dir = PathBuf::from(&deployment_name);
        let report_path = deployment_dir.join(REPORT_PATH);

        let report = if report_path.exists() {
            Some(serde_utils::read_deserialize::<Report>(&report_path).await?)
        } else {
            None
        };

        println!(
            "{}",
            home::render_home(
                &config,
                &networks,
                &rpc_url,
                &plan,
                report.as_ref()
            )
        );

        match inquire::Select::new(
            "Menu (Esc to quit):",
            vec![MainMenu::Proceed, MainMenu::SwitchNetwork],
        )
        .prompt_skippable()?
        {
            Some(MainMenu::Proceed) => break,
            Some(MainMenu::SwitchNetwork) => {
                rpc_url = select_rpc_url(&networks)?;
            }
            None => std::process::exit(0),
        }
    }

    Ok(Cmd::new(
        config_path,
        deployment_name,
        private_key,
        rpc_url,
        etherscan_api_key,
        cmd.target,
    ))
}

fn select_rpc_url(networks: &NetworkSet) -> eyre::Result<Url> {
    let chain =
        inquire::Select::new("Network:", networks.chains().to_vec()).prompt()?;

    let mut prompt = inquire::Text::new("Rpc Url:");
    if let Some(default_url) = chain.default_rpc_url() {
        prompt = prompt.with_default(default_url);
    }

    let rpc_url = prompt.prompt()?;

    Ok(rpc_url.parse()?)
}

async fn create_config_interactive() -> eyre::Result<PathBuf> {
    let config_path = loop {
        let filename = inquire::Text::new("Config filename:").prompt()?;

        let config_path = PathBuf::from(filename);

        if config_path.exists() {
            let overwrite =
                inquire::Confirm::new("Overwrite existing file?").prompt()?;

            if !overwrite {
                continue;
            }
        }

        break config_path;
    };

    let project_id: ProjectId = prompt_text_handle_errors("Project id:")?;

    let config = Config {
        app: AppConfig { project_id },
        compiler: Default::default(),
        contracts: Default::default(),
    };

    serde_utils::write_serialize(&config_path, &config).await?;

    Ok(config_path)
}
