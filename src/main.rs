use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    termgrid::cli::run_cli().await
}
