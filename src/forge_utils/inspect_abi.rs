use std::path::{Path, PathBuf};

use tracing::instrument;

use super::common::ContractSpec;

pub struct ForgeInspectAbi {
    cwd: Option<PathBuf>,
    contract_spec: ContractSpec,
}

impl ForgeInspectAbi {
    pub fn new(contract_spec: ContractSpec) -> Self {
        Self {
            cwd: None,
            contract_spec,
        }
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    #[instrument(name = "forge_inspect_abi", skip_all)]
    pub async fn run(&self) -> eyre::Result<ethers::abi::Abi> {
        let mut cmd = tokio::process::Command::new("forge");

        cmd.arg("inspect");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.arg(self.contract_spec.to_string());

        cmd.arg("abi");

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge inspect failed: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);

        Ok(serde_json::from_str(&stdout)?)
    }
}
