//! Registry configuration (TOML).

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_CERTS: u64 = 10_000;
pub const DEFAULT_MINT_FEE: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{path}: I/O error: {message}")]
    Io { path: String, message: String },

    #[error("{path}: TOML parse error: {message}")]
    Parse { path: String, message: String },

    #[error("TOML serialize error: {0}")]
    Serialize(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Initial scalars of a registry instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of certificates this instance will ever mint.
    #[serde(default = "default_max_certs")]
    pub max_certs: u64,

    /// Fee charged to the caller on every successful mint.
    #[serde(default = "default_mint_fee")]
    pub mint_fee: u64,
}

fn default_max_certs() -> u64 {
    DEFAULT_MAX_CERTS
}

fn default_mint_fee() -> u64 {
    DEFAULT_MINT_FEE
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_certs: default_max_certs(),
            mint_fee: default_mint_fee(),
        }
    }
}

impl RegistryConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_certs == 0 {
            return Err(ConfigError::Invalid("max_certs must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "certreg-config-{prefix}-{}-{unique}.toml",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = RegistryConfig::load("/nonexistent/certreg.toml").expect("defaults");
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.max_certs, 10_000);
        assert_eq!(config.mint_fee, 500);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: RegistryConfig = toml::from_str("mint_fee = 1000\n").expect("toml parses");
        assert_eq!(config.mint_fee, 1000);
        assert_eq!(config.max_certs, DEFAULT_MAX_CERTS);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let config = RegistryConfig {
            max_certs: 3,
            mint_fee: 42,
        };
        config.save(&path).expect("save should succeed");
        let loaded = RegistryConfig::load(&path).expect("load should succeed");
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let path = temp_path("zero");
        std::fs::write(&path, "max_certs = 0\n").expect("fixture should write");
        let err = RegistryConfig::load(&path).expect_err("zero capacity must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        let _ = std::fs::remove_file(path);
    }
}
