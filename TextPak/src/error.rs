//! Error types for `TextPak`

use thiserror::Error;

/// The error type for `TextPak` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Common Texts Codec Errors ====================
    /// Fewer bytes remain than a header or record field declares.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Byte offset where the short read started.
        offset: usize,
        /// Number of bytes the field declares.
        needed: usize,
        /// Number of bytes actually remaining.
        available: usize,
    },

    /// A record key is not valid UTF-8.
    #[error("record {index}: key at offset {offset} is not valid UTF-8")]
    MalformedKey {
        /// Zero-based record index.
        index: usize,
        /// Byte offset of the key bytes.
        offset: usize,
    },

    /// A record value is not valid UTF-16LE (e.g. an unpaired surrogate).
    #[error("record {index} ({key}): value at offset {offset} is not valid UTF-16LE")]
    MalformedValue {
        /// Zero-based record index.
        index: usize,
        /// Byte offset of the value bytes.
        offset: usize,
        /// Key of the offending record.
        key: String,
    },

    /// Bytes remain after the last declared record.
    #[error("{remaining} trailing bytes after last record at offset {offset}")]
    TrailingData {
        /// Offset of the first unconsumed byte.
        offset: usize,
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A value needs more UTF-16 code units than a u16 length can express.
    #[error("value for key '{key}' is {units} UTF-16 units long (maximum 65535)")]
    ValueTooLong {
        /// Key of the offending entry.
        key: String,
        /// Encoded length in UTF-16 code units.
        units: usize,
    },

    /// A key is longer than a u16 length can express.
    #[error("key '{key}' is {len} bytes long (maximum 65535)")]
    KeyTooLong {
        /// The offending key (lossy text form).
        key: String,
        /// Encoded length in bytes.
        len: usize,
    },

    /// More entries than the u32 header count can express.
    #[error("too many entries to encode: {count}")]
    TooManyEntries {
        /// Number of entries in the sequence.
        count: usize,
    },

    // ==================== Translation Table Errors ====================
    /// The table has no header row at all.
    #[error("translation table is empty")]
    EmptyTable,

    /// The first row is not `id\tflags\tsource\ttranslation`.
    #[error("invalid table header {found:?}: expected id\\tflags\\tsource\\ttranslation")]
    InvalidHeader {
        /// The header row as read.
        found: String,
    },

    /// A data row does not have exactly four columns.
    #[error("table row {row} has {columns} columns (expected 4)")]
    MalformedRow {
        /// One-based row number (the header is row 1).
        row: usize,
        /// Number of columns found.
        columns: usize,
    },

    // ==================== Merge Errors ====================
    /// Strict validation found placeholder or newline differences.
    #[error("placeholder or newline mismatch for keys: {}", keys.join(", "))]
    PlaceholderMismatch {
        /// Every offending key, sorted and de-duplicated.
        keys: Vec<String>,
    },

    // ==================== XML Exchange Errors ====================
    /// No `<string>` element with a usable `<id>` was found.
    #[error("no <string> entries with <id> found")]
    NoStringEntries,

    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

/// A specialized Result type for `TextPak` operations.
pub type Result<T> = std::result::Result<T, Error>;
