use std::fmt;
use std::str::FromStr;

use ethers::prelude::k256::SecretKey;

#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub key: SecretKey,
}

impl FromStr for PrivateKey {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start_matches("0x");

        let bytes = hex::decode(s)?;

        let key = SecretKey::from_slice(&bytes)?;

        Ok(Self { key })
    }
}

/// Redacted by default. `{:#}` yields the full key for process arguments.
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex = hex::encode(self.key.to_bytes());

        if f.alternate() {
            write!(f, "{hex}")
        } else {
            write!(f, "{}..{}", &hex[..4], &hex[hex.len() - 4..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str =
        "0x0102030405060708091011121314151617181920212223242526272829303132";

    #[test]
    fn parses_with_and_without_prefix() {
        let with_prefix: PrivateKey = KEY.parse().unwrap();
        let without_prefix: PrivateKey = KEY[2..].parse().unwrap();

        assert_eq!(
            with_prefix.key.to_bytes(),
            without_prefix.key.to_bytes()
        );
    }

    #[test]
    fn display_is_redacted() {
        let key: PrivateKey = KEY.parse().unwrap();

        assert_eq!(format!("{key}"), "0102..3132");
        assert_eq!(format!("{key:#}"), &KEY[2..]);
    }

    #[test]
    fn rejects_invalid_hex() {
        assert!("0xnothex".parse::<PrivateKey>().is_err());
    }
}
