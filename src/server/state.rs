//! Shared server state
//!
//! Wraps the immutable [`Searcher`] with a result cache and counters. The
//! searcher itself needs no locking; only the cache sits behind a mutex.

use crate::query::Searcher;
use crate::server::protocol::StatusResponse;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Statistics for the server
pub struct ServerStats {
    start_time: Instant,
    queries_served: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ServerStats {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            queries_served: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    pub fn queries_served(&self) -> u64 {
        self.queries_served.load(Ordering::Relaxed)
    }

    pub fn cache_hit_rate(&self) -> f32 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f32 / total as f32
        }
    }
}

/// Searcher plus per-process result cache
pub struct SearchService {
    searcher: Arc<Searcher>,
    /// Snippets keyed by case-folded query; `None` when caching is disabled
    cache: Option<Mutex<LruCache<String, Arc<Vec<String>>>>>,
    stats: ServerStats,
}

impl SearchService {
    pub fn new(searcher: Arc<Searcher>, cache_size: usize) -> Self {
        Self {
            searcher,
            cache: NonZeroUsize::new(cache_size).map(|n| Mutex::new(LruCache::new(n))),
            stats: ServerStats::new(),
        }
    }

    pub fn searcher(&self) -> &Arc<Searcher> {
        &self.searcher
    }

    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }

    /// Look up cached snippets for a query
    ///
    /// Case variants of a query share one entry: they match the same
    /// offsets and render identical snippets.
    pub fn cached(&self, query: &str) -> Option<Arc<Vec<String>>> {
        let cache = self.cache.as_ref()?;
        let key = query.to_ascii_lowercase();

        let hit = cache.lock().ok()?.get(&key).cloned();
        match hit {
            Some(snippets) => {
                self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
                self.stats.queries_served.fetch_add(1, Ordering::Relaxed);
                Some(snippets)
            }
            None => {
                self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Record freshly computed snippets for a query
    pub fn store(&self, query: &str, snippets: Arc<Vec<String>>) {
        self.stats.queries_served.fetch_add(1, Ordering::Relaxed);

        if let Some(cache) = &self.cache
            && let Ok(mut cache) = cache.lock()
        {
            cache.put(query.to_ascii_lowercase(), snippets);
        }
    }

    /// Run a query, consulting the cache first
    pub fn search(&self, query: &str) -> Arc<Vec<String>> {
        if let Some(snippets) = self.cached(query) {
            return snippets;
        }

        let snippets = Arc::new(self.searcher.search(query));
        self.store(query, Arc::clone(&snippets));
        snippets
    }

    pub fn status(&self) -> StatusResponse {
        let corpus = self.searcher.corpus();
        let meta = self.searcher.index().meta();

        StatusResponse {
            uptime_secs: self.stats.start_time.elapsed().as_secs(),
            corpus_bytes: corpus.len() as u64,
            corpus_lines: corpus.line_count() as u64,
            suffix_count: meta.suffix_count,
            persisted_index: meta.persisted,
            lookaround: self.searcher.lookaround(),
            queries_served: self.stats.queries_served(),
            cache_hit_rate: self.stats.cache_hit_rate(),
        }
    }
}
