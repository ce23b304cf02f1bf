use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::*;
use super::state::SearchService;

/// Create the HTTP router
///
/// Unmatched paths fall through to the static file directory.
pub fn create_router(service: Arc<SearchService>, static_dir: &Path) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
