use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use super::protocol::{HealthResponse, SearchParams};
use super::state::SearchService;

/// Body sent when `q` is missing or empty
pub const MISSING_QUERY_MESSAGE: &str = "missing search query in URL params";

/// Error wrapper for API handlers
#[derive(Debug)]
pub enum ApiError {
    MissingQuery,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingQuery => (StatusCode::BAD_REQUEST, MISSING_QUERY_MESSAGE).into_response(),
            ApiError::Internal(message) => {
                error!("search failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "search failure").into_response()
            }
        }
    }
}

/// Search the corpus, returning one snippet per match group
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Arc<Vec<String>>>, ApiError> {
    let query = params.query().ok_or(ApiError::MissingQuery)?.to_string();

    if let Some(snippets) = service.cached(&query) {
        debug!(query = %query, "cache hit");
        return Ok(Json(snippets));
    }

    // Rendering runs on the blocking pool
    let worker = Arc::clone(&service);
    let snippets = tokio::task::spawn_blocking(move || {
        let snippets = Arc::new(worker.searcher().search(&query));
        worker.store(&query, Arc::clone(&snippets));
        snippets
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(snippets))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Corpus, index and cache statistics
pub async fn stats(State(service): State<Arc<SearchService>>) -> impl IntoResponse {
    Json(service.status())
}
