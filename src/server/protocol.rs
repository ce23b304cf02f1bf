//! Request and response types for the HTTP API
//!
//! `GET /search?q=<query>` answers with a bare JSON array of snippet
//! strings; the remaining endpoints answer with the structs below.

use serde::{Deserialize, Serialize};

/// Query string of `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// The search query
    pub q: Option<String>,
}

impl SearchParams {
    /// The query, if present and non-empty
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Corpus size in bytes
    pub corpus_bytes: u64,
    /// Corpus line count
    pub corpus_lines: u64,
    /// Number of suffixes in the index
    pub suffix_count: u64,
    /// Whether the index was memory-mapped from disk
    pub persisted_index: bool,
    /// Bytes of context around each match group
    pub lookaround: usize,
    /// Total queries served
    pub queries_served: u64,
    /// Cache hit rate (0.0 - 1.0)
    pub cache_hit_rate: f32,
}
