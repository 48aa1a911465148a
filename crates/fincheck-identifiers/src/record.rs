//! CUSIP record with derived fields and optional descriptive metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::checksum::{isin_check_digit, CheckDigit};
use crate::error::{IdentifierError, Result};
use crate::family::IdentifierFamily;
use crate::lookup::{NoLookup, SecurityLookup};
use crate::validators::{validate_cusip, Identifier};

/// Broad class of a security, read from the CUSIP issue code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum IssueType {
    /// Numeric issue codes 10–88
    Equity,
    /// Issue codes containing a letter
    FixedIncome,
    /// Reserved numeric ranges (00–09, 89–99) and private-placement symbols
    Other,
}

impl IssueType {
    /// Classify a two-character CUSIP issue code
    pub fn classify(issue: &str) -> Self {
        if issue.chars().any(|c| c.is_ascii_alphabetic()) {
            return IssueType::FixedIncome;
        }
        match issue.parse::<u8>() {
            Ok(10..=88) => IssueType::Equity,
            _ => IssueType::Other,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueType::Equity => "equity",
            IssueType::FixedIncome => "fixed income",
            IssueType::Other => "other",
        };
        f.write_str(label)
    }
}

/// A validated CUSIP with its issuer/issue breakdown
///
/// Construction fails with [`IdentifierError::InvalidCusip`] rather than
/// producing a record in an invalid state, so [`Cusip::is_valid`] is always
/// true. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cusip {
    id: String,
    issuer: String,
    issue: String,
    issue_type: IssueType,
    check_digit: CheckDigit,
    name: Option<String>,
    security_type: Option<String>,
}

impl Cusip {
    /// Build a record with no metadata source
    pub fn parse(raw: &str) -> Result<Self> {
        Self::with_lookup(raw, &NoLookup)
    }

    /// Build a record, resolving name and security type through `lookup`
    ///
    /// The full CUSIP is tried first, then the 6-character issuer code. A
    /// miss leaves the descriptive fields empty.
    pub fn with_lookup<L>(raw: &str, lookup: &L) -> Result<Self>
    where
        L: SecurityLookup + ?Sized,
    {
        let id = validate_cusip(raw).map_err(|e| {
            tracing::debug!(cusip = raw, error = %e, "rejected CUSIP record");
            IdentifierError::InvalidCusip(raw.to_string())
        })?;
        Ok(Self::from_identifier(&id, lookup))
    }

    fn from_identifier<L>(id: &Identifier, lookup: &L) -> Self
    where
        L: SecurityLookup + ?Sized,
    {
        let value = id.as_str();
        let issuer = value[..6].to_string();
        let issue = value[6..8].to_string();

        let metadata = lookup.lookup(value).or_else(|| lookup.lookup(&issuer));
        if metadata.is_none() {
            tracing::debug!(cusip = value, issuer = %issuer, "no metadata found");
        }
        let (name, security_type) = match metadata {
            Some(m) => (Some(m.name), Some(m.security_type)),
            None => (None, None),
        };

        Self {
            id: value.to_string(),
            issue_type: IssueType::classify(&issue),
            issuer,
            issue,
            check_digit: id.check_digit(),
            name,
            security_type,
        }
    }

    /// The full 9-character CUSIP
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issuer name, when the metadata source knows it
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn security_type(&self) -> Option<&str> {
        self.security_type.as_deref()
    }

    /// Issuer code (CUSIP-6)
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Two-character issue code (characters 7–8)
    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    pub fn check_digit(&self) -> CheckDigit {
        self.check_digit
    }

    pub fn is_valid(&self) -> bool {
        true
    }

    /// Derive the ISIN for this CUSIP under a 2-letter country code
    ///
    /// Only the check digit is guaranteed; the ISIN is not looked up in any
    /// registry.
    ///
    /// # Examples
    /// ```
    /// use fincheck_identifiers::{is_isin, Cusip};
    /// let isin = Cusip::parse("98986X109").unwrap().to_isin("US").unwrap();
    /// assert_eq!(isin, "US98986X1090");
    /// assert!(is_isin(&isin));
    /// ```
    pub fn to_isin(&self, country: &str) -> Result<String> {
        let valid_country =
            country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase());
        if !valid_country {
            return Err(IdentifierError::format(
                IdentifierFamily::Isin,
                format!("country code {:?} must be two uppercase letters", country),
            ));
        }

        let body = format!("{}{}", country, self.id);
        let digit = isin_check_digit(&body)?;
        Ok(format!("{}{}", body, digit))
    }
}

impl fmt::Display for Cusip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Cusip {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&Identifier> for Cusip {
    type Error = IdentifierError;

    fn try_from(id: &Identifier) -> Result<Self> {
        if id.family() != IdentifierFamily::Cusip {
            return Err(IdentifierError::InvalidCusip(id.to_string()));
        }
        Ok(Self::from_identifier(id, &NoLookup))
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn cusip_to_isin_ffi(
    cusip: String,
    country: String,
) -> std::result::Result<String, IdentifierError> {
    Cusip::parse(&cusip)?.to_isin(&country)
}
