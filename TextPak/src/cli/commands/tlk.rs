//! CLI commands for XML string tables

use std::path::Path;
use std::time::Instant;

use super::progress_callback;
use crate::cli::progress::{DISK, print_done, print_step};
use crate::operations::{tlk_apply_with_progress, tlk_extract};

/// Export `<string>` elements to a translation table
pub fn extract(input: &Path, output: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    if !quiet {
        print_step(1, 1, DISK, &format!("Exporting {}...", input.display()));
    }
    let summary = tlk_extract(input, output)?;

    println!("Exported {} strings to {}", summary.rows, output.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}

/// Apply a translation table to an XML file
pub fn apply(input: &Path, tsv: &Path, output: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let report = tlk_apply_with_progress(input, tsv, output, progress_callback(quiet))?;

    println!("tsv_rows: {}", report.rows);
    println!("provided_translations: {}", report.provided);
    println!("applied: {}", report.applied);
    println!("missing_ids: {}", report.missing);
    if !report.missing_ids.is_empty() {
        println!("First missing ids:");
        for id in &report.missing_ids {
            println!("- {id}");
        }
    }

    if report.provided > 0 && report.applied == 0 {
        anyhow::bail!("No translations were applied, check that ids match the XML");
    }

    println!("Wrote {}", output.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
