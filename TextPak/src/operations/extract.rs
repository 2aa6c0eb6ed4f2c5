//! Binary to translation table pipelines

use std::path::Path;

use super::{OpPhase, OpProgress, ProgressCallback};
use crate::error::Result;
use crate::formats::common_texts::{read_common_texts, scan_records};
use crate::translation::export_entries;
use crate::utils::write_atomic;

/// Result of a strict extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Header version of the binary file
    pub version: u32,
    /// Number of records decoded
    pub entries: usize,
}

/// Result of a heuristic scan export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records accepted by the scanner
    pub records: usize,
    /// Distinct keys written to the table
    pub unique: usize,
}

/// Decode a binary file without writing anything
///
/// # Errors
/// Returns an IO or decode error.
pub fn inspect<P: AsRef<Path>>(input: P) -> Result<ExtractSummary> {
    let texts = read_common_texts(input)?;
    Ok(ExtractSummary {
        version: texts.version,
        entries: texts.len(),
    })
}

/// Export a strictly framed binary file to a translation table
///
/// # Errors
/// Returns an IO or decode error. Nothing is written if decoding fails.
pub fn extract_to_table<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<ExtractSummary> {
    extract_to_table_with_progress(input, output, &|_| {})
}

/// Export a strictly framed binary file to a translation table with progress callback
///
/// # Errors
/// Returns an IO or decode error. Nothing is written if decoding fails.
pub fn extract_to_table_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    progress: ProgressCallback,
) -> Result<ExtractSummary> {
    tracing::info!(
        "Extracting common texts: {:?} → {:?}",
        input.as_ref(),
        output.as_ref()
    );

    progress(&OpProgress::new(OpPhase::ReadingInput, 1, 2));
    let texts = read_common_texts(&input)?;

    progress(&OpProgress::with_message(
        OpPhase::WritingOutput,
        2,
        2,
        format!("Writing {} rows...", texts.len()),
    ));
    write_atomic(&output, export_entries(&texts.entries).as_bytes())?;

    progress(&OpProgress::new(OpPhase::Complete, 2, 2));
    tracing::info!("Extraction complete: {} entries", texts.len());
    Ok(ExtractSummary {
        version: texts.version,
        entries: texts.len(),
    })
}

/// Recover records from an unframed blob and export them, sorted by key
///
/// # Errors
/// Returns an IO error if the input cannot be read or the table cannot be written.
pub fn scan_to_table<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ScanSummary> {
    scan_to_table_with_progress(input, output, &|_| {})
}

/// Recover records from an unframed blob and export them with progress callback
///
/// # Errors
/// Returns an IO error if the input cannot be read or the table cannot be written.
pub fn scan_to_table_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    progress: ProgressCallback,
) -> Result<ScanSummary> {
    tracing::info!(
        "Scanning for records: {:?} → {:?}",
        input.as_ref(),
        output.as_ref()
    );

    progress(&OpProgress::new(OpPhase::ReadingInput, 1, 3));
    let data = std::fs::read(&input)?;

    progress(&OpProgress::with_message(
        OpPhase::Scanning,
        2,
        3,
        format!("Scanning {} bytes...", data.len()),
    ));
    let result = scan_records(&data);
    if result.duplicates() > 0 {
        tracing::warn!("Dropped {} repeated keys", result.duplicates());
    }

    let mut entries = result.entries;
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    progress(&OpProgress::with_message(
        OpPhase::WritingOutput,
        3,
        3,
        format!("Writing {} rows...", entries.len()),
    ));
    write_atomic(&output, export_entries(&entries).as_bytes())?;

    progress(&OpProgress::new(OpPhase::Complete, 3, 3));
    tracing::info!("Scan complete: {} records", entries.len());
    Ok(ScanSummary {
        records: result.records,
        unique: entries.len(),
    })
}
