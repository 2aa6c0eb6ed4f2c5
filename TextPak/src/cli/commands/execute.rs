//! Command execution implementations

use super::Commands;
use super::definitions::TlkCommands;
use super::{common_texts, tlk};
use crate::merge::MergeOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                input,
                output,
                quiet,
            } => common_texts::extract(input, output, *quiet),
            Commands::Scan {
                input,
                output,
                quiet,
            } => common_texts::scan(input, output, *quiet),
            Commands::Pack {
                input,
                tsv,
                output,
                allow_empty,
                strict_placeholders,
                quiet,
            } => {
                let options = MergeOptions {
                    allow_empty_overwrite: *allow_empty,
                    strict_placeholders: *strict_placeholders,
                };
                common_texts::pack(input, tsv, output, &options, *quiet)
            }
            Commands::Info { input, quiet } => common_texts::info(input, *quiet),
            Commands::Tlk { command } => command.execute(),
        }
    }
}

impl TlkCommands {
    /// Execute the selected XML command.
    ///
    /// # Errors
    /// Returns an error if the underlying XML operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            TlkCommands::Extract {
                input,
                output,
                quiet,
            } => tlk::extract(input, output, *quiet),
            TlkCommands::Apply {
                input,
                tsv,
                output,
                quiet,
            } => tlk::apply(input, tsv, output, *quiet),
        }
    }
}
