//! Engine configuration loader
//!
//! ```toml
//! [validation]
//! reject_duplicate_params = true
//! require_uniform_reserves = true
//! ```
//!
//! Every field is optional; an absent section or file means defaults, which
//! keep validation permissive.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config filename
pub const DEFAULT_CONFIG_FILENAME: &str = "bonds.toml";

/// Top-level configuration
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BondsConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Strictness knobs for bond and input validation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Fail parameter sets that repeat a name
    #[serde(default)]
    pub reject_duplicate_params: bool,
    /// Fail lockstep-family reserve balances that are not all equal
    #[serde(default)]
    pub require_uniform_reserves: bool,
}

impl ValidationConfig {
    /// Both checks enabled
    pub fn strict() -> Self {
        Self {
            reject_duplicate_params: true,
            require_uniform_reserves: true,
        }
    }
}

/// Configuration loading error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] toml::de::Error),
}

impl BondsConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from `path`; a missing file is an error
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(
            "Loaded bonds config from {}: {:?}",
            path.display(),
            config.validation
        );
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(missing)) => {
                tracing::info!("No bonds config at {}, using defaults", missing);
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_permissive() {
        let config = BondsConfig::default();
        assert!(!config.validation.reject_duplicate_params);
        assert!(!config.validation.require_uniform_reserves);
    }

    #[test]
    fn test_parse_partial_section() {
        let config = BondsConfig::from_toml_str(
            r#"
            [validation]
            reject_duplicate_params = true
            "#,
        )
        .unwrap();
        assert!(config.validation.reject_duplicate_params);
        assert!(!config.validation.require_uniform_reserves);

        assert_eq!(BondsConfig::from_toml_str("").unwrap(), BondsConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let result = BondsConfig::from_toml_str("[validation]\nreject_duplicate_params = \"yes\"");
        assert!(matches!(result, Err(ConfigError::Parsing(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\nrequire_uniform_reserves = true").unwrap();

        let config = BondsConfig::load(file.path()).unwrap();
        assert!(config.validation.require_uniform_reserves);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);

        assert!(matches!(BondsConfig::load(&path), Err(ConfigError::NotFound(_))));
        assert_eq!(BondsConfig::load_or_default(&path).unwrap(), BondsConfig::default());
    }
}
