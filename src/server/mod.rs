//! HTTP search server
//!
//! Loads the corpus and index once, then serves:
//!
//! - `GET /search?q=<query>` - JSON array of highlighted snippets
//! - `GET /health` - liveness probe
//! - `GET /stats` - corpus, index and cache statistics
//! - everything else - files from the static directory

mod handlers;
mod protocol;
mod router;
mod state;

pub use handlers::{ApiError, MISSING_QUERY_MESSAGE};
pub use protocol::{HealthResponse, SearchParams, StatusResponse};
pub use router::create_router;
pub use state::{SearchService, ServerStats};

use crate::query::Searcher;
use crate::utils::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Serve an already-loaded searcher until Ctrl+C
pub async fn run(searcher: Searcher, config: &AppConfig) -> Result<()> {
    let service = Arc::new(SearchService::new(Arc::new(searcher), config.cache_size));
    let app = create_router(service, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("listening on {}", addr);
    log_static_dir(&config.static_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn log_static_dir(static_dir: &Path) {
    if static_dir.is_dir() {
        info!("serving static files from {}", static_dir.display());
    } else {
        tracing::warn!("static directory {} not found", static_dir.display());
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal, gracefully shutting down");
}
