//! The search pipeline
//!
//! A [`Searcher`] owns the corpus and its suffix array, both immutable
//! after construction, and turns a query into snippets:
//!
//! ```text
//! query -> lookup (offsets) -> group_offsets (groups) -> format (snippets)
//! ```
//!
//! It holds no interior mutability, so one instance can be shared behind an
//! `Arc` by any number of concurrent callers.

use super::grouper::{group_offsets, merge_tolerance, MatchGroup};
use super::snippet::{Highlight, SnippetFormatter};
use crate::error::{FolioError, Result};
use crate::index::corpus::Corpus;
use crate::index::suffix_array::{SuffixArray, SuffixArrayBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Default bytes of context around each match group
pub const DEFAULT_LOOKAROUND: usize = 250;

/// Core-facing search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Bytes of context before the first and after the last match of a group
    pub lookaround: usize,
    /// Marker pair wrapped around every match
    pub highlight: Highlight,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            lookaround: DEFAULT_LOOKAROUND,
            highlight: Highlight::strong(),
        }
    }
}

/// Immutable corpus + index, ready to answer queries
pub struct Searcher {
    corpus: Corpus,
    index: SuffixArray,
    formatter: SnippetFormatter,
}

impl Searcher {
    /// Build the index for `corpus` in memory
    pub fn new(corpus: Corpus, options: SearchOptions) -> Self {
        let index = SuffixArrayBuilder::build(&corpus);
        Self::assemble(corpus, index, options)
    }

    /// Pair a corpus with an index built earlier
    ///
    /// Fails with [`FolioError::StaleIndex`] if the index was built from
    /// different text.
    pub fn with_index(corpus: Corpus, index: SuffixArray, options: SearchOptions) -> Result<Self> {
        if index.fingerprint() != corpus.fingerprint() || index.len() != corpus.len() {
            return Err(FolioError::StaleIndex {
                expected: corpus.fingerprint(),
                found: index.fingerprint(),
            });
        }

        Ok(Self::assemble(corpus, index, options))
    }

    /// Load a corpus file and build its index in memory
    pub fn load(path: &Path, options: SearchOptions) -> Result<Self> {
        let corpus = Corpus::open(path)?;
        Ok(Self::new(corpus, options))
    }

    fn assemble(corpus: Corpus, index: SuffixArray, options: SearchOptions) -> Self {
        Self {
            corpus,
            index,
            formatter: SnippetFormatter::new(options.lookaround, options.highlight),
        }
    }

    /// Offsets of every occurrence of `query`, in index order
    pub fn locate(&self, query: &str) -> Vec<usize> {
        self.index.lookup(&self.corpus, query.as_bytes())
    }

    /// Occurrences of `query` clustered into match groups
    pub fn groups(&self, query: &str) -> Vec<MatchGroup> {
        let tolerance = merge_tolerance(self.formatter.lookaround(), query.len());
        group_offsets(self.locate(query), tolerance)
    }

    /// Render the snippet for one group of `query`'s occurrences
    pub fn format_group(&self, group: &MatchGroup, query_len: usize) -> String {
        self.formatter
            .format(self.corpus.original(), group.offsets(), query_len)
    }

    /// One highlighted snippet per match group, earliest group first
    ///
    /// A query with no occurrences yields an empty vector.
    pub fn search(&self, query: &str) -> Vec<String> {
        let start = Instant::now();

        let groups = self.groups(query);
        let snippets: Vec<String> = groups
            .iter()
            .map(|group| self.format_group(group, query.len()))
            .collect();

        debug!(
            query,
            groups = groups.len(),
            occurrences = groups.iter().map(MatchGroup::len).sum::<usize>(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search complete"
        );

        snippets
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &SuffixArray {
        &self.index
    }

    pub fn lookaround(&self) -> usize {
        self.formatter.lookaround()
    }

    pub fn highlight(&self) -> &Highlight {
        self.formatter.highlight()
    }
}
