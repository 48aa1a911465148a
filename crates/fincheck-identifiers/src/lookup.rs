//! Descriptive metadata lookup
//!
//! Issuer names and security types live in some external dataset. The core
//! only needs `lookup(key) -> Option<SecurityMetadata>`; how the dataset is
//! loaded or refreshed is up to the implementor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive fields resolved for a CUSIP or issuer code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct SecurityMetadata {
    /// Issuer name
    pub name: String,
    /// Free-form security type, e.g. "COM" or "NOTE 2.5% 2030"
    pub security_type: String,
}

impl SecurityMetadata {
    pub fn new(name: impl Into<String>, security_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            security_type: security_type.into(),
        }
    }
}

/// Read-only source of descriptive metadata
///
/// Keys are either a full 9-character CUSIP or a 6-character issuer code.
/// A miss is not an error.
pub trait SecurityLookup {
    fn lookup(&self, key: &str) -> Option<SecurityMetadata>;
}

/// A lookup that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl SecurityLookup for NoLookup {
    fn lookup(&self, _key: &str) -> Option<SecurityMetadata> {
        None
    }
}

impl SecurityLookup for HashMap<String, SecurityMetadata> {
    fn lookup(&self, key: &str) -> Option<SecurityMetadata> {
        self.get(key).cloned()
    }
}

impl<T: SecurityLookup + ?Sized> SecurityLookup for &T {
    fn lookup(&self, key: &str) -> Option<SecurityMetadata> {
        (**self).lookup(key)
    }
}

impl<T: SecurityLookup + ?Sized> SecurityLookup for Box<T> {
    fn lookup(&self, key: &str) -> Option<SecurityMetadata> {
        (**self).lookup(key)
    }
}
