//! Server crate for the similar-movie recommender.
//!
//! This crate contains the orchestrator that runs a recommendation request,
//! the HTML rendering of its result, and the axum front-end that serves it.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod render;

pub use api::{create_router, AppState};
pub use config::ServeConfig;
pub use error::{RecommendError, ServerError};
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator, MAX_K};

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

/// Bind and serve until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Serving movie recommendations on http://{}", addr);

    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, never trigger shutdown
        std::future::pending::<()>().await;
    }
}
