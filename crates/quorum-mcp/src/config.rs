//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use quorum_core::{AcceptAll, AddressValidator, StrKeyValidator, MAX_SALT_BATCH};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// MCP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Largest voter list accepted by the tree tools
    pub max_voters: usize,

    /// Largest batch accepted by the salt tool (capped at 100)
    pub max_salt_batch: usize,

    /// Reject voter and admin addresses that are not Stellar accounts or contracts
    pub validate_addresses: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_voters: 10_000,
            max_salt_batch: MAX_SALT_BATCH,
            validate_addresses: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_voters == 0 {
            return Err(ConfigError::Invalid("max_voters must be positive".into()));
        }
        if self.max_salt_batch == 0 || self.max_salt_batch > MAX_SALT_BATCH {
            return Err(ConfigError::Invalid(format!(
                "max_salt_batch must be between 1 and {}",
                MAX_SALT_BATCH
            )));
        }
        Ok(())
    }

    /// Address validator implied by this configuration
    pub fn address_validator(&self) -> Arc<dyn AddressValidator> {
        if self.validate_addresses {
            Arc::new(StrKeyValidator)
        } else {
            Arc::new(AcceptAll)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.validate_addresses);
        assert_eq!(config.max_salt_batch, 100);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quorum.json");

        let config = ServerConfig {
            max_voters: 50,
            max_salt_batch: 10,
            validate_addresses: false,
        };
        config.save(&path).unwrap();

        assert_eq!(ServerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quorum.json");
        std::fs::write(&path, r#"{ "max_voters": 3 }"#).unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.max_voters, 3);
        assert!(config.validate_addresses);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quorum.json");
        std::fs::write(&path, r#"{ "max_salt_batch": 500 }"#).unwrap();

        assert!(matches!(
            ServerConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ServerConfig::load(Path::new("/nonexistent/quorum.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
