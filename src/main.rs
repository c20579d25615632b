use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    handcricket::cli::run_cli().await
}
