//! Identifier validation functions
//!
//! `validate_*` return a typed [`Identifier`] or the reason the candidate was
//! rejected; `is_*` collapse that to a boolean. The candidate must fit the
//! family shape over its entire length: no trimming, no case folding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checksum::{check_digit, Body, CheckDigit};
use crate::error::{IdentifierError, Result};
use crate::family::{find_mismatch, IdentifierFamily};

/// A complete identifier whose shape and check digit have been verified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier", into = "RawIdentifier")]
pub struct Identifier {
    family: IdentifierFamily,
    value: String,
}

impl Identifier {
    pub fn family(&self) -> IdentifierFamily {
        self.family
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Everything but the trailing check digit
    pub fn body(&self) -> &str {
        &self.value[..self.value.len() - 1]
    }

    pub fn check_digit(&self) -> CheckDigit {
        // Validated on construction: the last byte is an ASCII digit
        CheckDigit::from_ascii(self.value.as_bytes()[self.value.len() - 1])
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[derive(Serialize, Deserialize)]
struct RawIdentifier {
    family: IdentifierFamily,
    value: String,
}

impl TryFrom<RawIdentifier> for Identifier {
    type Error = IdentifierError;

    fn try_from(raw: RawIdentifier) -> Result<Self> {
        validate(raw.family, &raw.value)
    }
}

impl From<Identifier> for RawIdentifier {
    fn from(id: Identifier) -> Self {
        RawIdentifier {
            family: id.family,
            value: id.value,
        }
    }
}

/// Validate a complete candidate against a family: shape first, then checksum
pub fn validate(family: IdentifierFamily, candidate: &str) -> Result<Identifier> {
    if let Some(mismatch) = find_mismatch(family.shape(), candidate) {
        return Err(IdentifierError::format(family, mismatch.to_string()));
    }

    // Shape-valid, so the string is pure ASCII and the split is on a char boundary
    let (body, check) = candidate.split_at(candidate.len() - 1);
    let body = Body::parse(family, body)?;
    let expected = check_digit(&body);
    let found = check.as_bytes()[0] - b'0';

    if expected.value() != found {
        return Err(IdentifierError::InvalidChecksum {
            family,
            expected: expected.value(),
            found,
        });
    }

    Ok(Identifier {
        family,
        value: candidate.to_string(),
    })
}

pub fn validate_cusip(candidate: &str) -> Result<Identifier> {
    validate(IdentifierFamily::Cusip, candidate)
}

pub fn validate_isin(candidate: &str) -> Result<Identifier> {
    validate(IdentifierFamily::Isin, candidate)
}

pub fn validate_sedol(candidate: &str) -> Result<Identifier> {
    validate(IdentifierFamily::Sedol, candidate)
}

pub fn validate_aba(candidate: &str) -> Result<Identifier> {
    validate(IdentifierFamily::Aba, candidate)
}

/// Whether `candidate` is a complete, checksum-valid identifier of `family`
pub fn is_valid(family: IdentifierFamily, candidate: &str) -> bool {
    validate(family, candidate).is_ok()
}

/// Validate a CUSIP
///
/// # Examples
/// ```
/// use fincheck_identifiers::is_cusip;
/// assert!(is_cusip("30303M102"));
/// assert!(!is_cusip("30303M103"));
/// ```
pub fn is_cusip(candidate: &str) -> bool {
    is_valid(IdentifierFamily::Cusip, candidate)
}

pub fn is_isin(candidate: &str) -> bool {
    is_valid(IdentifierFamily::Isin, candidate)
}

pub fn is_sedol(candidate: &str) -> bool {
    is_valid(IdentifierFamily::Sedol, candidate)
}

pub fn is_aba(candidate: &str) -> bool {
    is_valid(IdentifierFamily::Aba, candidate)
}

/// Remove all whitespace and uppercase, e.g. `"us 0378 3310 05"` -> `"US0378331005"`
///
/// Validators never call this; apply it explicitly to user-typed input.
pub fn normalize_candidate(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
