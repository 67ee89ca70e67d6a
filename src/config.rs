use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub contracts: ContractsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub project_id: ProjectId,
}

/// Cloud project token for the wallet connection service. A deployment must
/// not start without one, so empty tokens are rejected while the config is
/// being parsed, before any provider or adapter exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(token: impl Into<String>) -> eyre::Result<Self> {
        let token = token.into();

        eyre::ensure!(!token.trim().is_empty(), "project id must not be empty");

        Ok(Self(token))
    }
}

impl TryFrom<String> for ProjectId {
    type Error = eyre::Error;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token)
    }
}

impl From<ProjectId> for String {
    fn from(project_id: ProjectId) -> Self {
        project_id.0
    }
}

impl FromStr for ProjectId {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Solc version the contracts are compiled with
    #[serde(default = "default_solc_version")]
    pub solc_version: String,

    /// Directory the generated ABI bindings are written to
    #[serde(default = "default_types_dir")]
    pub types_dir: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            solc_version: default_solc_version(),
            types_dir: default_types_dir(),
        }
    }
}

fn default_solc_version() -> String {
    "0.8.28".to_string()
}

fn default_types_dir() -> PathBuf {
    PathBuf::from("types")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Root of the forge project containing the ArtBidex contracts
    #[serde(default = "default_contracts_dir")]
    pub dir: PathBuf,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            dir: default_contracts_dir(),
        }
    }
}

fn default_contracts_dir() -> PathBuf {
    PathBuf::from("contracts")
}
