//! Configuration file loading
//!
//! Reads `config.toml` from `$FINCHECK_CONFIG` or the platform config
//! directory (`~/.config/fincheck/config.toml` on Linux):
//!
//! ```toml
//! families = ["cusip", "isin", "sedol"]
//! metadata_path = "/data/securities.csv"
//! default_country = "US"
//! normalize = false
//! ```
//!
//! A missing file yields the defaults; every key is optional.

use std::path::{Path, PathBuf};

use fincheck_identifiers::IdentifierFamily;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FincheckConfig {
    /// Families searched by `find` when no `--family` is given
    pub families: Vec<IdentifierFamily>,
    /// CSV dataset used by `describe`
    pub metadata_path: Option<PathBuf>,
    /// Country code used by `to-isin` when no `--country` is given
    pub default_country: String,
    /// Strip whitespace and uppercase candidates before checking them
    pub normalize: bool,
}

impl Default for FincheckConfig {
    fn default() -> Self {
        Self {
            families: IdentifierFamily::SECURITIES.to_vec(),
            metadata_path: None,
            default_country: "US".to_string(),
            normalize: false,
        }
    }
}

impl FincheckConfig {
    /// Default location: `$FINCHECK_CONFIG`, else `<config dir>/fincheck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FINCHECK_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("fincheck").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.families.is_empty() {
            return Err(ConfigError::Invalid(
                "families must name at least one identifier family".to_string(),
            ));
        }
        Ok(())
    }
}
