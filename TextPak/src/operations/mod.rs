//! File-level pipelines
//!
//! Each pipeline reads its inputs whole, runs the in-memory stages, and
//! finishes with one atomic write. A failure at any stage leaves the output
//! path untouched.
//!
//! ```no_run
//! use textpak::merge::MergeOptions;
//! use textpak::operations::{extract_to_table, pack};
//!
//! extract_to_table("common_texts.bin", "work/common_texts.tsv")?;
//! // ... translators fill in the translation column ...
//! let summary = pack(
//!     "common_texts.bin",
//!     "work/common_texts.tsv",
//!     "out/common_texts.bin",
//!     &MergeOptions::default(),
//! )?;
//! println!("{} entries replaced", summary.report.replaced);
//! # Ok::<(), textpak::Error>(())
//! ```

mod extract;
mod pack;
mod progress;
mod tlk;

pub use extract::{
    ExtractSummary, ScanSummary, extract_to_table, extract_to_table_with_progress, inspect,
    scan_to_table, scan_to_table_with_progress,
};
pub use pack::{PackSummary, pack, pack_with_progress};
pub use progress::{OpPhase, OpProgress, ProgressCallback};
pub use tlk::{TlkExtractSummary, tlk_apply, tlk_apply_with_progress, tlk_extract};
