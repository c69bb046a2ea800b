// notescrape HTTP server
//
// Serves POST /api/scrape. Live extraction runs only when NOTESCRAPE_ENV
// (or APP_ENV) selects local mode; otherwise synthetic data is served.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use notescrape::{AppState, ChromeLauncher, ScrapeConfig, ScrapeServer};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notescrape=info,tower_http=info")),
        )
        .init();

    let config = ScrapeConfig::from_env().context("Invalid configuration")?;
    info!(
        environment = config.mode().label(),
        platform = config.platform().unwrap_or("unknown"),
        headless = config.headless(),
        "Starting notescrape"
    );

    let state = AppState::from_config(ChromeLauncher::new(&config), &config);
    let server = ScrapeServer::start(state, config.bind())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind()))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received, draining requests");
    server.shutdown().await;
    Ok(())
}
