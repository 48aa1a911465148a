//! CSV-backed metadata dataset
//!
//! Expected layout, with a header row:
//!
//! ```text
//! key,name,security_type
//! 037833,APPLE INC,COM
//! 931142103,WALMART INC,COM
//! ```
//!
//! `key` is either a full CUSIP or a 6-character issuer code.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{IdentifierError, Result};
use crate::lookup::{SecurityLookup, SecurityMetadata};

#[derive(Debug, Deserialize)]
struct MetadataRow {
    key: String,
    name: String,
    #[serde(default)]
    security_type: String,
}

/// In-memory metadata table keyed by CUSIP or issuer code
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<String, SecurityMetadata>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            IdentifierError::Metadata(format!("cannot open {}: {}", path.display(), e))
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded metadata table");
        Ok(table)
    }

    /// Load CSV data from any reader
    ///
    /// Keys are trimmed and uppercased; later rows replace earlier rows with
    /// the same key. Rows with an empty key are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::new();
        for (line, result) in csv_reader.deserialize::<MetadataRow>().enumerate() {
            let row = result.map_err(|e| IdentifierError::Metadata(e.to_string()))?;
            if row.key.is_empty() {
                // Header is line 1, so data row N sits on line N + 2
                tracing::warn!(line = line + 2, "skipping metadata row with empty key");
                continue;
            }
            table.insert(&row.key, SecurityMetadata::new(row.name, row.security_type));
        }

        Ok(table)
    }

    pub fn insert(&mut self, key: &str, metadata: SecurityMetadata) {
        self.entries.insert(normalize_key(key), metadata);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SecurityLookup for MetadataTable {
    /// Queries are trimmed and uppercased the same way stored keys are
    fn lookup(&self, key: &str) -> Option<SecurityMetadata> {
        self.entries.get(&normalize_key(key)).cloned()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "key,name,security_type\n\
                          037833,APPLE INC,COM\n\
                          931142103,WALMART INC,COM\n";

    #[test]
    fn test_from_reader() {
        let table = MetadataTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("037833").unwrap().name, "APPLE INC");
        assert_eq!(table.lookup("931142103").unwrap().security_type, "COM");
        assert!(table.lookup("000000").is_none());
    }

    #[test]
    fn test_keys_are_normalized() {
        let data = "key,name,security_type\n 30303m ,META PLATFORMS INC,CL A\n";
        let table = MetadataTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.lookup("30303M").unwrap().security_type, "CL A");
        assert_eq!(table.lookup("30303m").unwrap().security_type, "CL A");
        assert_eq!(table.lookup(" 30303m ").unwrap().name, "META PLATFORMS INC");
    }

    #[test]
    fn test_empty_key_is_skipped() {
        let data = "key,name,security_type\n,NOBODY,COM\n037833,APPLE INC,COM\n";
        let table = MetadataTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_later_rows_override() {
        let data = "key,name,security_type\n037833,OLD NAME,COM\n037833,APPLE INC,COM\n";
        let table = MetadataTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.lookup("037833").unwrap().name, "APPLE INC");
    }

    #[test]
    fn test_missing_security_type_column() {
        let data = "key,name\n037833,APPLE INC\n";
        let table = MetadataTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.lookup("037833").unwrap().security_type, "");
    }

    #[test]
    fn test_missing_file() {
        let err = MetadataTable::from_path("/definitely/not/here.csv").unwrap_err();
        match err {
            IdentifierError::Metadata(message) => {
                assert!(message.starts_with("cannot open /definitely/not/here.csv"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
