use clap::Subcommand;
use std::path::PathBuf;

pub mod common_texts;
pub mod definitions;
mod execute;
pub mod tlk;

pub use definitions::TlkCommands;

use crate::cli::progress::print_progress;
use crate::operations::{OpProgress, ProgressCallback};

#[derive(Subcommand)]
pub enum Commands {
    /// Export a binary common texts file to a translation table
    Extract {
        /// Source binary file
        #[arg(short, long)]
        input: PathBuf,

        /// Output TSV table
        #[arg(short, long)]
        output: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Recover records from a binary blob without trusted framing
    Scan {
        /// Source binary blob
        input: PathBuf,

        /// Output TSV table, sorted by key
        output: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Merge a translation table into a binary common texts file
    Pack {
        /// Original binary file
        #[arg(short, long)]
        input: PathBuf,

        /// Translation table
        #[arg(short, long)]
        tsv: PathBuf,

        /// Output binary file
        #[arg(short, long)]
        output: PathBuf,

        /// Let empty translations clear the original text
        #[arg(long)]
        allow_empty: bool,

        /// Fail if placeholders or line breaks differ from the source
        #[arg(long)]
        strict_placeholders: bool,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show header information of a binary common texts file
    Info {
        /// Binary file to inspect
        input: PathBuf,

        /// Print only the counts
        #[arg(short, long)]
        quiet: bool,
    },

    /// XML string table commands
    Tlk {
        #[command(subcommand)]
        command: TlkCommands,
    },
}

fn silent(_: &OpProgress) {}

/// Step printer for a command, or a no-op when quiet
pub(crate) fn progress_callback(quiet: bool) -> ProgressCallback<'static> {
    if quiet {
        return &silent;
    }
    &print_progress
}
