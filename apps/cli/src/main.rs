fn main() -> anyhow::Result<()> {
    reciflow_cli::run()
}
