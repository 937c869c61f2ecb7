//! State lookup server.
//!
//! Loads region borders once at startup and answers
//! "which state contains this point?" over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state_server::api::{router, AppState};
use state_server::config::Config;
use state_server::loader::load_catalog;
use state_server::PipService;

#[derive(Parser, Debug)]
#[command(name = "state-server")]
#[command(about = "Point-in-polygon state lookup server")]
struct Args {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Newline-delimited JSON border file (overrides config)
    #[arg(long)]
    states_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.server.listen = listen;
        }
        if let Some(states_file) = self.states_file {
            config.data.states_file = states_file;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Args::parse().into_config()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("State Server");

    // Borders are loaded before binding so no request sees a partial catalog
    let catalog = load_catalog(&config.data.states_file).with_context(|| {
        format!(
            "Failed to load region borders from {}",
            config.data.states_file.display()
        )
    })?;
    info!("Data cleaned and loaded: {} regions", catalog.len());

    let state = Arc::new(AppState::new(PipService::new(catalog)));
    let app = router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}
