fn main() -> anyhow::Result<()> {
    textpak::cli::run_cli()
}
