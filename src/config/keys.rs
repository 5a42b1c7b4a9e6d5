use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// API credentials, loaded from a JSON file next to the binary
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub tmdb_key: String,
    #[serde(default)]
    pub pmdb_key: String,
    #[serde(default)]
    pub mdblist_key: String,
}

impl ApiKeys {
    /// Load and validate keys. All three services are required: TMDB for
    /// search, MDblist for ratings, PMDB for reads and submissions.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read API keys file {}", path.display()))?;
        let keys: ApiKeys = serde_json::from_str(&json)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        keys.validate()?;
        Ok(keys)
    }

    fn validate(&self) -> Result<()> {
        if self.tmdb_key.is_empty() {
            anyhow::bail!("TMDB API key is required");
        }
        if self.pmdb_key.is_empty() {
            anyhow::bail!("PMDB API key is required");
        }
        if self.mdblist_key.is_empty() {
            anyhow::bail!("MDblist API key is required for ratings");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_rejected() {
        let keys: ApiKeys =
            serde_json::from_str(r#"{"tmdb_key": "a", "pmdb_key": "b"}"#).unwrap();
        assert!(keys.validate().is_err());
    }

    #[test]
    fn test_complete_keys_are_accepted() {
        let keys: ApiKeys =
            serde_json::from_str(r#"{"tmdb_key": "a", "pmdb_key": "b", "mdblist_key": "c"}"#)
                .unwrap();
        assert!(keys.validate().is_ok());
    }
}
