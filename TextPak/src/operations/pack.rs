//! Translation table to binary pipeline

use std::path::Path;

use super::{OpPhase, OpProgress, ProgressCallback};
use crate::error::Result;
use crate::formats::common_texts::{CommonTexts, read_common_texts, write_common_texts};
use crate::merge::{MergeOptions, MergeReport, merge_entries};
use crate::translation::load_table;

/// Result of packing translations into a binary file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    /// Header version, carried over from the input
    pub version: u32,
    /// Data rows read from the table
    pub table_rows: usize,
    /// Merge counts
    pub report: MergeReport,
}

/// Merge a translation table into a binary file and write the result
///
/// # Errors
/// Returns a decode, table, merge or IO error. No output is written unless
/// every stage succeeds.
pub fn pack<P, T, Q>(input: P, table: T, output: Q, options: &MergeOptions) -> Result<PackSummary>
where
    P: AsRef<Path>,
    T: AsRef<Path>,
    Q: AsRef<Path>,
{
    pack_with_progress(input, table, output, options, &|_| {})
}

/// Merge a translation table into a binary file with progress callback
///
/// # Errors
/// Returns a decode, table, merge or IO error. No output is written unless
/// every stage succeeds.
pub fn pack_with_progress<P, T, Q>(
    input: P,
    table: T,
    output: Q,
    options: &MergeOptions,
    progress: ProgressCallback,
) -> Result<PackSummary>
where
    P: AsRef<Path>,
    T: AsRef<Path>,
    Q: AsRef<Path>,
{
    tracing::info!(
        "Packing common texts: {:?} + {:?} → {:?}",
        input.as_ref(),
        table.as_ref(),
        output.as_ref()
    );

    progress(&OpProgress::new(OpPhase::ReadingInput, 1, 4));
    let original = read_common_texts(&input)?;

    progress(&OpProgress::new(OpPhase::LoadingTable, 2, 4));
    let table = load_table(&table)?;

    progress(&OpProgress::with_message(
        OpPhase::Merging,
        3,
        4,
        format!("Merging {} rows into {} entries...", table.row_count(), original.len()),
    ));
    let (entries, report) = merge_entries(&original.entries, &table, options)?;

    progress(&OpProgress::new(OpPhase::WritingOutput, 4, 4));
    let packed = CommonTexts {
        version: original.version,
        entries,
    };
    write_common_texts(&output, &packed)?;

    progress(&OpProgress::new(OpPhase::Complete, 4, 4));
    tracing::info!("Pack complete: {} replaced", report.replaced);
    Ok(PackSummary {
        version: original.version,
        table_rows: table.row_count(),
        report,
    })
}
