//! Common texts localization format
//!
//! Binary table of short identifier keys paired with UTF-16LE text values.
//! All integers are little-endian:
//!
//! ```text
//! u32 version | u32 count | record * count
//! record = u16 key_len | key_len bytes (UTF-8) | u16 value_units | value_units * 2 bytes (UTF-16LE)
//! ```
//!
//! The strict reader trusts the header count and rejects trailing bytes.
//! For blobs without trustworthy framing, [`scan_records`] recovers the same
//! records heuristically.

mod reader;
mod scanner;
mod writer;

pub use reader::{parse_common_texts_bytes, read_common_texts};
pub use scanner::{
    MAX_KEY_LEN, MAX_VALUE_UNITS, MIN_PRINTABLE_RATIO, ScanResult, ScannerConfig, scan_records,
    scan_records_with,
};
pub use writer::{encode_common_texts, write_common_texts};

/// Size of the `version` + `count` header in bytes
pub const HEADER_SIZE: usize = 8;

/// A single key/value localization unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Identifier key as text
    pub key: String,
    /// The localized text
    pub value: String,
    /// Key bytes exactly as stored in the source file
    pub key_bytes: Vec<u8>,
}

impl Entry {
    /// Create an entry whose stored key bytes are the UTF-8 form of `key`
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let key_bytes = key.as_bytes().to_vec();
        Self {
            key,
            value: value.into(),
            key_bytes,
        }
    }

    /// Copy of this entry with a different value; key bytes are kept verbatim
    #[must_use]
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            value: value.into(),
            key_bytes: self.key_bytes.clone(),
        }
    }
}

/// A decoded common texts file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonTexts {
    /// Format version from the header, written back unchanged
    pub version: u32,
    /// Records in file order
    pub entries: Vec<Entry>,
}

impl CommonTexts {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            entries: Vec::new(),
        }
    }

    /// Look up an entry by key; the last occurrence wins
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
