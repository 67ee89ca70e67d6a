use std::path::Path;

use eyre::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub async fn read_deserialize<T>(path: impl AsRef<Path>) -> eyre::Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Reading from {}", path.display()))?;

    let value = serde_yaml::from_str(&content).with_context(|| {
        format!("Parsing {} content was {content}", path.display())
    })?;

    Ok(value)
}

pub async fn write_serialize<T>(
    path: impl AsRef<Path>,
    value: T,
) -> eyre::Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    let content = serde_yaml::to_string(&value)
        .with_context(|| format!("Serializing {}", path.display()))?;

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Writing to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u64,
    }

    #[tokio::test]
    async fn round_trips_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.yml");

        let sample = Sample {
            name: "artbidex".to_string(),
            value: 42,
        };

        write_serialize(&path, &sample).await.unwrap();
        let read: Sample = read_deserialize(&path).await.unwrap();

        assert_eq!(read, sample);
    }

    #[tokio::test]
    async fn missing_file_reports_the_path() {
        let err = read_deserialize::<Sample>("does-not-exist.yml")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("does-not-exist.yml"));
    }
}
