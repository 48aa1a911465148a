//! Mod-10 check digit engines
//!
//! The Luhn algorithm (double every second digit from the right) backs ISIN,
//! and the fixed-weight variant backs SEDOL and ABA routing numbers.

use crate::checksum::CheckDigit;
use crate::error::{IdentifierError, Result};

/// Compute the Luhn check digit to append to `digits`
///
/// Starting from the rightmost digit of the payload, every second digit is
/// doubled (positions 0, 2, 4, ... counted from the right), two-digit results
/// have 9 subtracted, and the check digit tops the sum up to a multiple of 10.
///
/// # Examples
/// ```
/// use fincheck_identifiers::luhn_check_digit;
/// assert_eq!(luhn_check_digit("7992739871").unwrap().value(), 3);
/// assert!(luhn_check_digit("").is_err());
/// ```
pub fn luhn_check_digit(digits: &str) -> Result<CheckDigit> {
    let values = luhn_digits(digits)?;
    Ok(luhn_from_values(values.iter().copied()))
}

/// Whether a complete number (payload plus trailing check digit) passes Luhn
pub fn is_luhn_valid(number: &str) -> bool {
    let mut chars = number.chars();
    let Some(found) = chars.next_back().and_then(|c| c.to_digit(10)) else {
        return false;
    };
    match luhn_check_digit(chars.as_str()) {
        Ok(expected) => u32::from(expected.value()) == found,
        Err(_) => false,
    }
}

/// Weighted mod-10 check digit: `(10 - Σ value·weight mod 10) mod 10`
///
/// `values` and `weights` are paired positionally; surplus entries on either
/// side are ignored. Terms are reduced mod 10 as they are summed, so any
/// `u32` input is accepted.
pub fn weighted_check_digit(values: &[u32], weights: &[u32]) -> CheckDigit {
    let sum = values
        .iter()
        .zip(weights)
        .map(|(v, w)| (v % 10) * (w % 10))
        .fold(0, |acc, term| (acc + term) % 10);
    CheckDigit::from_sum(sum)
}

fn luhn_digits(digits: &str) -> Result<Vec<u32>> {
    if digits.is_empty() {
        return Err(IdentifierError::InvalidInput(
            "Luhn input must contain at least one digit".to_string(),
        ));
    }

    digits
        .chars()
        .map(|c| {
            c.to_digit(10).ok_or_else(|| {
                IdentifierError::InvalidInput(format!(
                    "Luhn input must be decimal digits, found {:?}",
                    c
                ))
            })
        })
        .collect()
}

/// Luhn over an already-validated digit sequence (left to right)
pub(crate) fn luhn_from_values<I>(values: I) -> CheckDigit
where
    I: DoubleEndedIterator<Item = u32>,
{
    let sum: u32 = values
        .rev()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    CheckDigit::from_sum(sum)
}
