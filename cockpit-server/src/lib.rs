//! PitWall Cockpit Server Library
//!
//! Exposes server components for integration testing.

pub mod announcer;
pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod web_ui;

use tracing::info;

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: state::AppState) -> error::Result<()> {
    let addr = state.config.bind_addr();
    let app = api::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            clock::stop(&state).await;
        })
        .await?;

    Ok(())
}
