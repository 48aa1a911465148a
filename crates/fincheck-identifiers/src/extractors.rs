//! Identifier extraction from text
//!
//! Text is split into maximal runs of word characters (`\w`: letters, digits,
//! underscore). A run is a candidate only when its whole length fits the
//! family shape, so identifiers are never pulled out of the middle of longer
//! alphanumeric tokens. Candidates whose check digit does not match are
//! dropped silently: free text is full of 9-character tokens.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IdentifierError, Result};
use crate::family::IdentifierFamily;
use crate::validators::{validate, Identifier};

lazy_static! {
    // The regex engine is linear-time, so long inputs cannot backtrack
    static ref WORD_RUN: Regex = Regex::new(r"\w+").unwrap();
}

/// Extracted identifier with position information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ExtractedIdentifier {
    pub family: IdentifierFamily,
    pub value: String,
    /// Byte offset of the first character
    pub start_index: u32,
    /// Byte offset one past the last character
    pub end_index: u32,
}

/// Lazy scan of a text for checksum-valid identifiers of one family
///
/// Cloning a `Matches` snapshots its position, so a scan can be restarted
/// or forked at any point. Scanning the same text twice yields identical
/// results.
#[derive(Debug, Clone)]
pub struct Matches<'t> {
    family: IdentifierFamily,
    text: &'t str,
    pos: usize,
}

impl Matches<'_> {
    pub fn family(&self) -> IdentifierFamily {
        self.family
    }

    /// Advance to the next checksum-valid candidate, returning it with its
    /// byte span
    fn next_identifier(&mut self) -> Option<(Identifier, usize, usize)> {
        while let Some(run) = WORD_RUN.find_at(self.text, self.pos) {
            self.pos = run.end();

            let candidate = run.as_str();
            if !self.family.matches_shape(candidate) {
                continue;
            }

            match validate(self.family, candidate) {
                Ok(id) => return Some((id, run.start(), run.end())),
                Err(e) => {
                    tracing::trace!(candidate, error = %e, "rejected candidate");
                }
            }
        }

        self.pos = self.text.len();
        None
    }
}

impl Iterator for Matches<'_> {
    type Item = ExtractedIdentifier;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, start, end) = self.next_identifier()?;
        Some(ExtractedIdentifier {
            family: self.family,
            value: id.into_string(),
            start_index: start as u32,
            end_index: end as u32,
        })
    }
}

impl std::iter::FusedIterator for Matches<'_> {}

/// Scan `text` for identifiers of `family`, in order of appearance
pub fn extract(text: &str, family: IdentifierFamily) -> Matches<'_> {
    Matches {
        family,
        text,
        pos: 0,
    }
}

/// Collect every checksum-valid identifier of `family` in `text`
pub fn extract_identifiers(text: &str, family: IdentifierFamily) -> Vec<Identifier> {
    let mut scan = extract(text, family);
    std::iter::from_fn(|| scan.next_identifier().map(|(id, _, _)| id)).collect()
}

fn extract_values(text: &str, family: IdentifierFamily) -> Vec<String> {
    extract(text, family).map(|hit| hit.value).collect()
}

/// Extract CUSIPs from text
///
/// # Examples
/// ```
/// use fincheck_identifiers::get_cusips;
/// assert_eq!(get_cusips("M0392N101 M0392N100"), vec!["M0392N101"]);
/// ```
pub fn get_cusips(text: &str) -> Vec<String> {
    extract_values(text, IdentifierFamily::Cusip)
}

/// Extract ISINs from text
pub fn get_isins(text: &str) -> Vec<String> {
    extract_values(text, IdentifierFamily::Isin)
}

/// Extract SEDOLs from text
pub fn get_sedols(text: &str) -> Vec<String> {
    extract_values(text, IdentifierFamily::Sedol)
}

/// Extract ABA routing numbers from text
pub fn get_abas(text: &str) -> Vec<String> {
    extract_values(text, IdentifierFamily::Aba)
}

/// Extract identifiers of several families, sorted by position
///
/// A token that fits more than one family (a 9-digit run can be both a
/// CUSIP and an ABA number) is reported once per family, in `include` order.
pub fn extract_all(text: &str, include: &[IdentifierFamily]) -> Vec<ExtractedIdentifier> {
    let mut results: Vec<ExtractedIdentifier> = unique_families(include)
        .into_iter()
        .flat_map(|family| extract(text, family))
        .collect();

    // Stable sort keeps family order for hits at the same offset
    results.sort_by_key(|r| r.start_index);
    results
}

/// Find security identifiers in text, grouped by family
///
/// `include` must name at least one family; [`IdentifierFamily::SECURITIES`]
/// is the usual choice. Every requested family appears in the result, with
/// an empty list when nothing was found.
pub fn find_securities(
    text: &str,
    include: &[IdentifierFamily],
) -> Result<BTreeMap<IdentifierFamily, Vec<String>>> {
    let families = non_empty_families(include)?;
    Ok(families
        .into_iter()
        .map(|family| (family, extract_values(text, family)))
        .collect())
}

/// Run [`find_securities`] over many texts, concatenating results in input order
pub fn find_securities_in_list<S: AsRef<str>>(
    texts: &[S],
    include: &[IdentifierFamily],
) -> Result<BTreeMap<IdentifierFamily, Vec<String>>> {
    let families = non_empty_families(include)?;
    let mut results: BTreeMap<IdentifierFamily, Vec<String>> =
        families.iter().map(|f| (*f, Vec::new())).collect();

    for text in texts {
        for family in &families {
            if let Some(found) = results.get_mut(family) {
                found.extend(extract_values(text.as_ref(), *family));
            }
        }
    }

    Ok(results)
}

fn unique_families(include: &[IdentifierFamily]) -> Vec<IdentifierFamily> {
    let mut families = Vec::with_capacity(include.len());
    for family in include {
        if !families.contains(family) {
            families.push(*family);
        }
    }
    families
}

fn non_empty_families(include: &[IdentifierFamily]) -> Result<Vec<IdentifierFamily>> {
    let families = unique_families(include);
    if families.is_empty() {
        return Err(IdentifierError::InvalidInput(
            "must include at least one of CUSIP, ISIN, SEDOL or ABA".to_string(),
        ));
    }
    Ok(families)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn get_cusips_ffi(text: String) -> Vec<String> {
    get_cusips(&text)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn get_isins_ffi(text: String) -> Vec<String> {
    get_isins(&text)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn get_sedols_ffi(text: String) -> Vec<String> {
    get_sedols(&text)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn get_abas_ffi(text: String) -> Vec<String> {
    get_abas(&text)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn extract_all_ffi(text: String, include: Vec<IdentifierFamily>) -> Vec<ExtractedIdentifier> {
    extract_all(&text, &include)
}
