//! Suffix array indexing module
//!
//! This module provides O(m log n) exact substring search using suffix arrays
//! built over the case-folded corpus.
//!
//! ## Architecture
//!
//! - `builder`: Constructs suffix arrays from a corpus
//! - `writer`: Persists suffix arrays to disk
//! - `reader`: In-memory or memory-mapped lookups
//! - `types`: Core type definitions
//!
//! ## File Format
//!
//! One file per corpus, `sa.bin`: a 28-byte header (magic, version, suffix
//! count, corpus fingerprint, flags) followed by the sorted positions as
//! little-endian u64.

pub mod builder;
pub mod reader;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use builder::SuffixArrayBuilder;
pub use reader::SuffixArray;
pub use types::{SuffixArrayMeta, MAX_COMPARE, SA_FILE_NAME};
pub use writer::SuffixArrayWriter;
