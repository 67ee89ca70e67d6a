use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ContractSpec {
    pub path: Option<PathBuf>,
    pub name: String,
}

impl ContractSpec {
    pub fn path_name(path: PathBuf, name: impl ToString) -> Self {
        Self {
            path: Some(path),
            name: name.to_string(),
        }
    }

    pub fn name(name: impl ToString) -> Self {
        Self {
            path: None,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ContractSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path.as_deref() {
            write!(f, "{}:{}", path.display(), self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_path_qualified_and_bare_specs() {
        let bare = ContractSpec::name("ArtBidexNFT");
        assert_eq!(bare.to_string(), "ArtBidexNFT");

        let qualified = ContractSpec::path_name(
            PathBuf::from("src/ArtBidexNFT.sol"),
            "ArtBidexNFT",
        );
        assert_eq!(qualified.to_string(), "src/ArtBidexNFT.sol:ArtBidexNFT");
    }
}
