//! TextPak CLI - Command-line interface for localization table tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "textpak")]
#[command(about = "TextPak: binary localization table round-tripping", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the TextPak CLI
///
/// # Errors
/// Returns an error if the selected command fails.
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_accepts_quiet() {
        let invocations: [&[&str]; 6] = [
            &["textpak", "extract", "-i", "in.bin", "-o", "out.tsv", "-q"],
            &["textpak", "scan", "in.bin", "out.tsv", "--quiet"],
            &["textpak", "pack", "-i", "in.bin", "-t", "uk.tsv", "-o", "out.bin", "-q"],
            &["textpak", "info", "in.bin", "-q"],
            &["textpak", "tlk", "extract", "in.xml", "out.tsv", "-q"],
            &["textpak", "tlk", "apply", "in.xml", "uk.tsv", "out.xml", "-q"],
        ];
        for args in invocations {
            assert!(Cli::try_parse_from(args).is_ok(), "rejected {args:?}");
        }
    }

    #[test]
    fn test_info_quiet_flag_parsed() {
        let cli = Cli::try_parse_from(["textpak", "info", "in.bin", "--quiet"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { quiet: true, .. }));
    }
}
