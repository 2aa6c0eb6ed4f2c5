//! CLI commands for binary common texts files

use std::path::Path;
use std::time::Instant;

use super::progress_callback;
use crate::cli::progress::print_done;
use crate::error::Error;
use crate::merge::MergeOptions;
use crate::operations::{
    extract_to_table_with_progress, inspect, pack_with_progress, scan_to_table_with_progress,
};

/// Export a binary file to a translation table
pub fn extract(input: &Path, output: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let summary = extract_to_table_with_progress(input, output, progress_callback(quiet))?;

    println!("version: {}", summary.version);
    println!("entries: {}", summary.entries);
    println!("Wrote {}", output.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}

/// Recover records from an unframed blob
pub fn scan(input: &Path, output: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let summary = scan_to_table_with_progress(input, output, progress_callback(quiet))?;

    println!("records: {}", summary.records);
    println!("unique_keys: {}", summary.unique);
    if summary.unique == 0 {
        println!("No records recognised in {}", input.display());
    }
    println!("Wrote {}", output.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}

/// Merge a translation table into a binary file
pub fn pack(
    input: &Path,
    tsv: &Path,
    output: &Path,
    options: &MergeOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let summary = match pack_with_progress(input, tsv, output, options, progress_callback(quiet)) {
        Ok(summary) => summary,
        Err(Error::PlaceholderMismatch { keys }) => {
            println!("Placeholder or newline mismatch for keys:");
            for key in &keys {
                println!("- {key}");
            }
            anyhow::bail!("{} translations failed validation, nothing written", keys.len());
        }
        Err(e) => return Err(e.into()),
    };

    let report = &summary.report;
    println!("entries_total: {}", report.entries_total);
    println!("tsv_rows: {}", summary.table_rows);
    println!("replaced_count: {}", report.replaced);
    println!("skipped_empty_count: {}", report.skipped_empty);
    println!("missing_keys_in_tsv_count: {}", report.missing_in_table);
    println!("Wrote {}", output.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}

/// Show header information
pub fn info(input: &Path, quiet: bool) -> anyhow::Result<()> {
    let summary = inspect(input)?;

    if !quiet {
        println!("File: {}", input.display());
    }
    println!("version: {}", summary.version);
    println!("entries: {}", summary.entries);
    Ok(())
}
