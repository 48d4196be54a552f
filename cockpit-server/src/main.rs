//! PitWall Cockpit Server
//!
//! Race simulation server with dashboard UI and REST API

use anyhow::{Context, Result};
use cockpit_server::{config::Config, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("loading configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!(
        circuit = %config.race.circuit,
        seed = ?config.race.seed,
        "Starting PitWall Cockpit Server"
    );

    let state = AppState::from_config(config);
    cockpit_server::serve(state).await?;

    Ok(())
}
