//! XML string table pipelines

use std::path::Path;

use super::{OpPhase, OpProgress, ProgressCallback};
use crate::error::Result;
use crate::formats::tlk::{ApplyReport, apply_translations, extract_strings};
use crate::translation::{load_table, write_table};
use crate::utils::write_atomic;

/// Result of exporting XML strings to a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlkExtractSummary {
    /// Rows written
    pub rows: usize,
}

/// Export the `<string>` elements of an XML file to a translation table
///
/// # Errors
/// Returns an IO, UTF-8 or XML error, or [`Error::NoStringEntries`] if the
/// document has no usable strings.
///
/// [`Error::NoStringEntries`]: crate::Error::NoStringEntries
pub fn tlk_extract<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<TlkExtractSummary> {
    tracing::info!(
        "Extracting XML strings: {:?} → {:?}",
        input.as_ref(),
        output.as_ref()
    );

    let xml = String::from_utf8(std::fs::read(&input)?)?;
    let rows = extract_strings(&xml)?;
    write_atomic(&output, write_table(&rows).as_bytes())?;

    tracing::info!("Extraction complete: {} strings", rows.len());
    Ok(TlkExtractSummary { rows: rows.len() })
}

/// Apply a translation table to an XML file and write the updated document
///
/// # Errors
/// Returns an IO, UTF-8, XML or table error.
pub fn tlk_apply<P, T, Q>(input: P, table: T, output: Q) -> Result<ApplyReport>
where
    P: AsRef<Path>,
    T: AsRef<Path>,
    Q: AsRef<Path>,
{
    tlk_apply_with_progress(input, table, output, &|_| {})
}

/// Apply a translation table to an XML file with progress callback
///
/// # Errors
/// Returns an IO, UTF-8, XML or table error.
pub fn tlk_apply_with_progress<P, T, Q>(
    input: P,
    table: T,
    output: Q,
    progress: ProgressCallback,
) -> Result<ApplyReport>
where
    P: AsRef<Path>,
    T: AsRef<Path>,
    Q: AsRef<Path>,
{
    tracing::info!(
        "Applying translations to XML: {:?} + {:?} → {:?}",
        input.as_ref(),
        table.as_ref(),
        output.as_ref()
    );

    progress(&OpProgress::new(OpPhase::ReadingInput, 1, 4));
    let xml = String::from_utf8(std::fs::read(&input)?)?;

    progress(&OpProgress::new(OpPhase::LoadingTable, 2, 4));
    let table = load_table(&table)?;

    progress(&OpProgress::with_message(
        OpPhase::Merging,
        3,
        4,
        format!("Applying {} rows...", table.row_count()),
    ));
    let (updated, report) = apply_translations(&xml, &table)?;

    progress(&OpProgress::new(OpPhase::WritingOutput, 4, 4));
    write_atomic(&output, updated.as_bytes())?;

    progress(&OpProgress::new(OpPhase::Complete, 4, 4));
    tracing::info!(
        "Applied {} of {} provided translations",
        report.applied,
        report.provided
    );
    Ok(report)
}
