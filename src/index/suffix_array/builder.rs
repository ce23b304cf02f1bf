//! Suffix array builder
//!
//! Builds a suffix array over the case-folded corpus by sorting every
//! suffix position, in parallel for large texts.
//!
//! The resulting suffix array enables O(m log n) substring search.

use super::reader::SuffixArray;
use super::types::*;
use crate::index::corpus::Corpus;
use rayon::prelude::*;
use tracing::debug;

/// Builder for constructing suffix arrays from a corpus
pub struct SuffixArrayBuilder;

impl SuffixArrayBuilder {
    /// Build the suffix array for a corpus
    ///
    /// This is the main computation - sorts all suffixes of the folded text
    pub fn build(corpus: &Corpus) -> SuffixArray {
        let start = std::time::Instant::now();
        let entries = build_suffix_array_parallel(corpus.folded());

        debug!(
            suffixes = entries.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built suffix array"
        );

        SuffixArray::from_entries(entries, corpus.fingerprint())
    }
}

/// Build suffix array using parallel sort
///
/// This approach:
/// 1. Creates array of all suffix positions [0, 1, 2, ..., n-1]
/// 2. Sorts positions by comparing the suffixes they point to
/// 3. Uses rayon for parallel sorting
///
/// Time: O(n log n) comparisons, each bounded by `MAX_COMPARE` bytes
/// Space: O(n) for the suffix array
fn build_suffix_array_parallel(text: &[u8]) -> Vec<SuffixEntry> {
    let n = text.len();

    let mut sa: Vec<SuffixEntry> = (0..n as SuffixEntry).collect();

    if n > PARALLEL_SORT_THRESHOLD {
        sa.par_sort_unstable_by(|&a, &b| compare_suffixes(text, a as usize, b as usize));
    } else {
        sa.sort_unstable_by(|&a, &b| compare_suffixes(text, a as usize, b as usize));
    }

    sa
}

/// Compare two suffixes lexicographically on their first `MAX_COMPARE` bytes
#[inline]
fn compare_suffixes(text: &[u8], a: usize, b: usize) -> std::cmp::Ordering {
    let len_a = (text.len() - a).min(MAX_COMPARE);
    let len_b = (text.len() - b).min(MAX_COMPARE);

    text[a..a + len_a].cmp(&text[b..b + len_b])
}
