fn main() -> anyhow::Result<()> {
    routelens::cli::run_cli()
}
