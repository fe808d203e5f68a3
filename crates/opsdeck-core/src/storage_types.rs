//! Storage backend identifiers shared between configuration and the
//! storage crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage backend type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// In-memory backend; data lives for the process lifetime only.
    Memory,
    /// Single JSON document on local disk with atomic replace-on-write.
    JsonFile,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::JsonFile => write!(f, "jsonfile"),
        }
    }
}
