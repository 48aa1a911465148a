//! Error types for fincheck-identifiers

use thiserror::Error;

use crate::family::IdentifierFamily;

/// Result type alias for identifier operations
pub type Result<T> = std::result::Result<T, IdentifierError>;

/// Main error type for check-digit, validation and record operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum IdentifierError {
    /// Wrong length or character class for the target family
    #[error("Invalid {family} format: {reason}")]
    InvalidFormat {
        family: IdentifierFamily,
        reason: String,
    },

    /// Correct shape, wrong trailing check digit
    #[error("Invalid {family} checksum: expected check digit {expected}, found {found}")]
    InvalidChecksum {
        family: IdentifierFamily,
        expected: u8,
        found: u8,
    },

    /// Empty or non-numeric input to the Luhn engine, or an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A CUSIP record could not be constructed from the given string
    #[error("Invalid CUSIP: {0}")]
    InvalidCusip(String),

    /// The metadata dataset could not be read
    #[error("Metadata error: {0}")]
    Metadata(String),
}

impl IdentifierError {
    pub(crate) fn format(family: IdentifierFamily, reason: impl Into<String>) -> Self {
        IdentifierError::InvalidFormat {
            family,
            reason: reason.into(),
        }
    }
}
