//! Check digits, validation and extraction for financial identifiers
//!
//! This crate provides tools for working with security identifiers and bank
//! routing numbers:
//! - Luhn and weighted mod-10 check digit engines
//! - CUSIP, ISIN, SEDOL and ABA check digit computation
//! - Strict validation and boolean `is_*` checks
//! - Extraction of checksum-valid identifiers from free text
//! - A CUSIP record with issuer/issue breakdown, metadata lookup and ISIN
//!   derivation

pub mod checksum;
pub mod error;
pub mod extractors;
pub mod family;
pub mod lookup;
pub mod luhn;
#[cfg(feature = "csv")]
pub mod metadata;
pub mod record;
pub mod routing;
pub mod validators;

pub use checksum::*;
pub use error::*;
pub use extractors::*;
pub use family::{CharClass, IdentifierFamily};
pub use lookup::*;
pub use luhn::*;
#[cfg(feature = "csv")]
pub use metadata::*;
pub use record::*;
pub use routing::*;
pub use validators::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_ffi(family: IdentifierFamily, candidate: String) -> bool {
    is_valid(family, &candidate)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn check_digit_ffi(
    family: IdentifierFamily,
    body: String,
) -> std::result::Result<u8, IdentifierError> {
    family_check_digit(family, &body).map(CheckDigit::value)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn luhn_check_digit_ffi(digits: String) -> std::result::Result<u8, IdentifierError> {
    luhn_check_digit(&digits).map(CheckDigit::value)
}
