use anyhow::Result;
use clap::Parser;

use pagereach_cli::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
