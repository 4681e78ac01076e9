//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The HTTP front end

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod server;

const DEFAULT_LOG_FILTER: &str = "weather_cli=info,weather_core=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
