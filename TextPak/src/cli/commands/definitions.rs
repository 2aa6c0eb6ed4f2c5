//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// XML string table commands
#[derive(Subcommand)]
pub enum TlkCommands {
    /// Export `<string>` elements to a translation table
    Extract {
        /// Source XML file
        input: PathBuf,

        /// Output TSV table
        output: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write translations from a table into `<string>` elements
    Apply {
        /// Source XML file
        input: PathBuf,

        /// Translation table
        tsv: PathBuf,

        /// Output XML file
        output: PathBuf,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },
}
