mod cli;
mod logging;
mod orchestrator;
mod storage;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(&args)?;

    match cli::run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run failed");
            Err(e)
        }
    }
}
