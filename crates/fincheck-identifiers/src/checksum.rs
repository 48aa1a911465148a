//! Per-family check digit computation
//!
//! Each family maps its body (everything but the trailing digit) to the
//! expected check digit. The body's shape is always checked first, so a
//! malformed string surfaces as `InvalidFormat` and never as a misleading
//! checksum.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IdentifierError, Result};
use crate::family::{char_value, find_mismatch, IdentifierFamily};
use crate::luhn::{luhn_from_values, weighted_check_digit};

const SEDOL_WEIGHTS: [u32; 6] = [1, 3, 1, 7, 3, 9];
const ABA_WEIGHTS: [u32; 8] = [3, 7, 1, 3, 7, 1, 3, 7];

/// A single decimal check digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CheckDigit(u8);

impl CheckDigit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }

    /// From an ASCII byte already known to be `b'0'..=b'9'`
    pub(crate) fn from_ascii(byte: u8) -> Self {
        Self(byte - b'0')
    }

    /// The digit that tops `sum` up to the next multiple of 10
    pub(crate) fn from_sum(sum: u32) -> Self {
        Self(((10 - sum % 10) % 10) as u8)
    }
}

impl fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for CheckDigit {
    type Error = IdentifierError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or_else(|| {
            IdentifierError::InvalidInput(format!("check digit must be 0-9, got {}", value))
        })
    }
}

impl From<CheckDigit> for u8 {
    fn from(value: CheckDigit) -> Self {
        value.0
    }
}

/// An identifier body whose length and character classes fit its family
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Body {
    family: IdentifierFamily,
    text: String,
}

impl Body {
    /// Check `text` against the family's body shape
    pub fn parse(family: IdentifierFamily, text: &str) -> Result<Self> {
        if let Some(mismatch) = find_mismatch(family.body_shape(), text) {
            return Err(IdentifierError::format(family, format!("body {}", mismatch)));
        }
        Ok(Self {
            family,
            text: text.to_string(),
        })
    }

    pub fn family(&self) -> IdentifierFamily {
        self.family
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Compute the check digit for this body
    pub fn check_digit(&self) -> CheckDigit {
        check_digit(self)
    }

    fn values(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        // Shape-checked, so every character is in the value alphabet
        self.text.chars().filter_map(char_value)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compute the check digit for a shape-valid body
pub fn check_digit(body: &Body) -> CheckDigit {
    match body.family {
        IdentifierFamily::Cusip => cusip_digit(body),
        IdentifierFamily::Isin => isin_digit(body),
        IdentifierFamily::Sedol => {
            let values: Vec<u32> = body.values().collect();
            weighted_check_digit(&values, &SEDOL_WEIGHTS)
        }
        IdentifierFamily::Aba => {
            let values: Vec<u32> = body.values().collect();
            weighted_check_digit(&values, &ABA_WEIGHTS)
        }
    }
}

/// Compute the CUSIP check digit for an 8-character body
///
/// # Examples
/// ```
/// use fincheck_identifiers::cusip_check_digit;
/// assert_eq!(cusip_check_digit("93114210").unwrap().value(), 3);
/// ```
pub fn cusip_check_digit(body: &str) -> Result<CheckDigit> {
    Body::parse(IdentifierFamily::Cusip, body).map(|b| check_digit(&b))
}

/// Compute the ISIN check digit for an 11-character body
pub fn isin_check_digit(body: &str) -> Result<CheckDigit> {
    Body::parse(IdentifierFamily::Isin, body).map(|b| check_digit(&b))
}

/// Compute the SEDOL check digit for a 6-character body
pub fn sedol_check_digit(body: &str) -> Result<CheckDigit> {
    Body::parse(IdentifierFamily::Sedol, body).map(|b| check_digit(&b))
}

/// Compute the ABA routing number check digit for an 8-digit body
pub fn aba_check_digit(body: &str) -> Result<CheckDigit> {
    Body::parse(IdentifierFamily::Aba, body).map(|b| check_digit(&b))
}

/// Compute the check digit for `body` in the given family
pub fn family_check_digit(family: IdentifierFamily, body: &str) -> Result<CheckDigit> {
    Body::parse(family, body).map(|b| check_digit(&b))
}

// Odd positions (0-indexed) are doubled; every weighted value contributes
// the sum of its decimal digits.
fn cusip_digit(body: &Body) -> CheckDigit {
    let sum: u32 = body
        .values()
        .enumerate()
        .map(|(i, v)| if i % 2 == 1 { v * 2 } else { v })
        .map(|v| v / 10 + v % 10)
        .sum();
    CheckDigit::from_sum(sum)
}

// Letters expand to two decimal digits before Luhn runs over the result.
fn isin_digit(body: &Body) -> CheckDigit {
    let digits: Vec<u32> = body
        .values()
        .flat_map(|v| {
            if v >= 10 {
                vec![v / 10, v % 10]
            } else {
                vec![v]
            }
        })
        .collect();
    luhn_from_values(digits.into_iter())
}
