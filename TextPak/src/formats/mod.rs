//! File format handlers
//!
//! - `common_texts` - binary key/UTF-16 value tables (strict codec and scanner)
//! - `tlk` - XML `<string>` tables exchanged through translation tables

pub mod common_texts;
pub mod tlk;

// Re-export main types for convenience
pub use common_texts::{
    CommonTexts, Entry, encode_common_texts, parse_common_texts_bytes, read_common_texts,
    scan_records, write_common_texts,
};
pub use tlk::{ApplyReport, apply_translations, extract_strings};
