//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;

/// CLI-level error categories mapped to exit codes
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Identifier(#[from] fincheck_identifiers::IdentifierError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// One or more `validate` candidates failed
    #[error("{count} of {total} identifiers failed validation")]
    Invalid { count: usize, total: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid { .. } => 1,
            Self::Identifier(_) => 2,
            Self::Config(_) => 3,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
