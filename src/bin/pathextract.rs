fn main() -> anyhow::Result<()> {
    pathextract::cli::run_cli()
}
