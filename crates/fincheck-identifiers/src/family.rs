//! Identifier families and their fixed shapes
//!
//! Every family has a fixed total length and a per-position character class.
//! Shapes are checked before any checksum arithmetic, so a malformed string
//! never reaches the checksum engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdentifierError;

/// Families of identifiers this crate knows how to check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum IdentifierFamily {
    /// 9-character North American security identifier
    Cusip,
    /// 12-character international security identifier
    Isin,
    /// 7-character UK/Ireland security identifier
    Sedol,
    /// 9-digit US bank routing transit number
    Aba,
}

/// Character class required at one position of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `0-9`
    Digit,
    /// `A-Z`
    Letter,
    /// `0-9A-Z`
    Alphanumeric,
    /// `0-9A-Z` plus the private-placement symbols `*`, `@`, `#`
    CusipBody,
    /// `0-9` plus consonants; SEDOLs never use vowels
    SedolBody,
}

impl CharClass {
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_uppercase(),
            CharClass::Alphanumeric => c.is_ascii_digit() || c.is_ascii_uppercase(),
            CharClass::CusipBody => {
                c.is_ascii_digit() || c.is_ascii_uppercase() || matches!(c, '*' | '@' | '#')
            }
            CharClass::SedolBody => {
                c.is_ascii_digit()
                    || (c.is_ascii_uppercase() && !matches!(c, 'A' | 'E' | 'I' | 'O' | 'U'))
            }
        }
    }

    fn describe(self) -> &'static str {
        match self {
            CharClass::Digit => "a digit",
            CharClass::Letter => "an uppercase letter",
            CharClass::Alphanumeric => "an uppercase letter or digit",
            CharClass::CusipBody => "an uppercase letter, digit or one of '*', '@', '#'",
            CharClass::SedolBody => "a digit or uppercase consonant",
        }
    }
}

use CharClass::{Alphanumeric, CusipBody, Digit, Letter, SedolBody};

const CUSIP_SHAPE: [CharClass; 9] = [
    CusipBody, CusipBody, CusipBody, CusipBody, CusipBody, CusipBody, CusipBody, CusipBody, Digit,
];

const ISIN_SHAPE: [CharClass; 12] = [
    Letter,
    Letter,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Alphanumeric,
    Digit,
];

const SEDOL_SHAPE: [CharClass; 7] = [
    SedolBody, SedolBody, SedolBody, SedolBody, SedolBody, SedolBody, Digit,
];

const ABA_SHAPE: [CharClass; 9] = [Digit; 9];

impl IdentifierFamily {
    /// The security identifier families searched by default
    pub const SECURITIES: [IdentifierFamily; 3] = [
        IdentifierFamily::Cusip,
        IdentifierFamily::Isin,
        IdentifierFamily::Sedol,
    ];

    /// Get all identifier families
    pub fn all() -> &'static [IdentifierFamily] {
        &[
            IdentifierFamily::Cusip,
            IdentifierFamily::Isin,
            IdentifierFamily::Sedol,
            IdentifierFamily::Aba,
        ]
    }

    /// Total length including the check digit
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        self.shape().len()
    }

    /// Length of the body, i.e. everything but the check digit
    pub fn body_len(self) -> usize {
        self.len() - 1
    }

    /// Per-position character classes of a complete identifier
    pub fn shape(self) -> &'static [CharClass] {
        match self {
            IdentifierFamily::Cusip => &CUSIP_SHAPE,
            IdentifierFamily::Isin => &ISIN_SHAPE,
            IdentifierFamily::Sedol => &SEDOL_SHAPE,
            IdentifierFamily::Aba => &ABA_SHAPE,
        }
    }

    /// Per-position character classes of the body
    pub fn body_shape(self) -> &'static [CharClass] {
        let shape = self.shape();
        &shape[..shape.len() - 1]
    }

    pub fn name(self) -> &'static str {
        match self {
            IdentifierFamily::Cusip => "CUSIP",
            IdentifierFamily::Isin => "ISIN",
            IdentifierFamily::Sedol => "SEDOL",
            IdentifierFamily::Aba => "ABA",
        }
    }

    /// Whether `text` has exactly this family's complete shape
    pub fn matches_shape(self, text: &str) -> bool {
        find_mismatch(self.shape(), text).is_none()
    }
}

impl fmt::Display for IdentifierFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentifierFamily {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cusip" => Ok(IdentifierFamily::Cusip),
            "isin" => Ok(IdentifierFamily::Isin),
            "sedol" => Ok(IdentifierFamily::Sedol),
            "aba" | "rtn" => Ok(IdentifierFamily::Aba),
            other => Err(IdentifierError::InvalidInput(format!(
                "unknown identifier family '{}' (expected one of cusip, isin, sedol, aba)",
                other
            ))),
        }
    }
}

/// Why a string does not fit a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mismatch {
    Length {
        expected: usize,
        found: usize,
    },
    Char {
        index: usize,
        ch: char,
        class: CharClass,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Length { expected, found } => {
                write!(f, "expected {} characters, got {}", expected, found)
            }
            Mismatch::Char { index, ch, class } => write!(
                f,
                "character {:?} at position {} is not {}",
                ch,
                index,
                class.describe()
            ),
        }
    }
}

/// Length first, then the first position whose character is out of class
pub(crate) fn find_mismatch(shape: &[CharClass], text: &str) -> Option<Mismatch> {
    let found = text.chars().count();
    if found != shape.len() {
        return Some(Mismatch::Length {
            expected: shape.len(),
            found,
        });
    }

    text.chars()
        .zip(shape)
        .enumerate()
        .find(|(_, (ch, class))| !class.matches(*ch))
        .map(|(index, (ch, class))| Mismatch::Char {
            index,
            ch,
            class: *class,
        })
}

/// Numeric value of a character in the `0-9A-Z*@#` alphabet
///
/// Digits map to themselves, letters to 10–35 and `*`, `@`, `#` to 36–38.
pub(crate) fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        '*' => Some(36),
        '@' => Some(37),
        '#' => Some(38),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(IdentifierFamily::Cusip.len(), 9);
        assert_eq!(IdentifierFamily::Isin.len(), 12);
        assert_eq!(IdentifierFamily::Sedol.len(), 7);
        assert_eq!(IdentifierFamily::Aba.len(), 9);
        assert_eq!(IdentifierFamily::Isin.body_len(), 11);
    }

    #[test]
    fn char_values() {
        assert_eq!(char_value('0'), Some(0));
        assert_eq!(char_value('9'), Some(9));
        assert_eq!(char_value('A'), Some(10));
        assert_eq!(char_value('Z'), Some(35));
        assert_eq!(char_value('*'), Some(36));
        assert_eq!(char_value('@'), Some(37));
        assert_eq!(char_value('#'), Some(38));
        assert_eq!(char_value('a'), None);
        assert_eq!(char_value(' '), None);
    }

    #[test]
    fn sedol_body_rejects_vowels() {
        assert!(CharClass::SedolBody.matches('B'));
        assert!(CharClass::SedolBody.matches('7'));
        for vowel in ['A', 'E', 'I', 'O', 'U'] {
            assert!(!CharClass::SedolBody.matches(vowel));
        }
    }

    #[test]
    fn lowercase_never_matches() {
        assert!(!IdentifierFamily::Cusip.matches_shape("30303m102"));
        assert!(IdentifierFamily::Cusip.matches_shape("30303M102"));
        assert!(!IdentifierFamily::Isin.matches_shape("us0378331005"));
    }

    #[test]
    fn mismatch_reports_length_before_characters() {
        let mismatch = find_mismatch(IdentifierFamily::Aba.shape(), "12x4");
        assert_eq!(
            mismatch,
            Some(Mismatch::Length {
                expected: 9,
                found: 4
            })
        );
    }

    #[test]
    fn mismatch_reports_first_bad_position() {
        let mismatch = find_mismatch(IdentifierFamily::Isin.shape(), "U50378331005");
        assert_eq!(
            mismatch,
            Some(Mismatch::Char {
                index: 1,
                ch: '5',
                class: CharClass::Letter
            })
        );
    }

    #[test]
    fn parse_family_names() {
        assert_eq!("CUSIP".parse::<IdentifierFamily>().unwrap(), IdentifierFamily::Cusip);
        assert_eq!(" isin ".parse::<IdentifierFamily>().unwrap(), IdentifierFamily::Isin);
        assert_eq!("rtn".parse::<IdentifierFamily>().unwrap(), IdentifierFamily::Aba);
        assert!("figi".parse::<IdentifierFamily>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&IdentifierFamily::Sedol).unwrap();
        assert_eq!(json, "\"sedol\"");
    }
}
