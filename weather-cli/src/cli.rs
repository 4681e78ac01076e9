use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing::info;
use weather_core::{Config, ProviderId, WeatherLookup};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any place name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "mapbox" or "weatherstack".
        provider: String,
    },

    /// Show current weather for an address.
    Show {
        /// Address or location name.
        address: String,
    },

    /// Serve the web front end and the `/weather` endpoint.
    Serve {
        /// Port to listen on; defaults to $PORT, then the config file, then 3000.
        #[arg(long, short)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { address } => show(&address).await,
            Command::Serve { port } => serve(port).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Stored in the weather config file")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(anyhow!("API key for '{id}' must not be empty"));
    }

    let mut cfg = Config::load()?;
    let verb = if cfg.is_provider_configured(id) { "Replaced" } else { "Saved" };
    cfg.upsert_provider_api_key(id, api_key.to_string());
    cfg.save()?;

    println!("{verb} {id} credentials in {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(address: &str) -> anyhow::Result<()> {
    let cfg = Config::load_with_env()?;
    let lookup = WeatherLookup::from_config(&cfg)?;

    let report = lookup
        .lookup(Some(address))
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    println!("{}", report.location);
    println!("{}", report.forecast);
    Ok(())
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let cfg = Config::load_with_env()?;
    let lookup = WeatherLookup::from_config(&cfg)?;
    let port = port.unwrap_or_else(|| cfg.port());
    let public_dir = cfg.public_dir();

    info!(public_dir = %public_dir.display(), "Serving static pages");
    server::run(port, lookup, &public_dir).await
}
