//! # TextPak
//!
//! A pure-Rust library for round-tripping binary localization tables through
//! human-editable translation tables.
//!
//! ## Supported Formats
//!
//! - **Common texts** - Binary key / UTF-16LE value tables, decoded strictly
//!   from their header or recovered heuristically from unframed blobs
//! - **Translation tables** - Tab-separated `id/flags/source/translation` rows
//! - **TLK XML** - `<string>` element tables sharing the translation table format
//!
//! ## Quick Start
//!
//! ### Exporting and Packing
//!
//! ```no_run
//! use textpak::merge::MergeOptions;
//! use textpak::operations::{extract_to_table, pack};
//!
//! // Export binary entries for translators
//! extract_to_table("common_texts.bin", "common_texts.tsv")?;
//!
//! // Merge the filled-in table back, validating placeholders
//! let options = MergeOptions { strict_placeholders: true, ..MergeOptions::default() };
//! let summary = pack("common_texts.bin", "common_texts.tsv", "out/common_texts.bin", &options)?;
//! println!("Replaced {} entries", summary.report.replaced);
//! # Ok::<(), textpak::Error>(())
//! ```
//!
//! ### Working in Memory
//!
//! ```
//! use textpak::formats::common_texts::{Entry, encode_common_texts, parse_common_texts_bytes};
//!
//! let bytes = encode_common_texts(1, &[Entry::new("menu_start", "Start")])?;
//! let texts = parse_common_texts_bytes(&bytes)?;
//! assert_eq!(texts.entries[0].value, "Start");
//! # Ok::<(), textpak::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `textpak` command-line binary

pub mod error;
pub mod formats;
pub mod merge;
pub mod operations;
pub mod translation;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::common_texts::{
        CommonTexts, Entry, ScannerConfig, encode_common_texts, parse_common_texts_bytes,
        read_common_texts, scan_records, write_common_texts,
    };
    pub use crate::formats::tlk::{ApplyReport, apply_translations, extract_strings};
    pub use crate::merge::{MergeOptions, MergeReport, merge_entries};
    pub use crate::operations::{
        ExtractSummary, PackSummary, ScanSummary, extract_to_table, pack, scan_to_table,
    };
    pub use crate::translation::{TranslationRow, TranslationTable, load_table, parse_table};
    pub use crate::utils::write_atomic;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
