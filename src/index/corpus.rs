//! The searchable corpus
//!
//! A corpus holds the full text twice: the original bytes used for rendering
//! snippets, and an ASCII case-folded copy the suffix array is built over.
//! Folding is length-preserving, so an offset found in the folded text
//! addresses the same byte in the original.

use crate::error::{FolioError, Result};
use std::fs;
use std::path::Path;

/// Immutable corpus text in original and case-folded form
///
/// Both forms are owned: later edits to the file on disk never reach a
/// loaded corpus.
pub struct Corpus {
    original: Vec<u8>,
    folded: Vec<u8>,
    fingerprint: u64,
    line_count: usize,
}

impl Corpus {
    /// Read a corpus file into memory
    ///
    /// Any failure to read the file is reported as
    /// [`FolioError::CorpusUnavailable`]; there is no partially loaded corpus.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| FolioError::CorpusUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_bytes(bytes))
    }

    /// Build a corpus from bytes already in memory
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let original: Vec<u8> = bytes.into();
        let folded = fold_case(&original);
        let fingerprint = fingerprint(&original);
        let line_count = count_lines(&original);

        Self {
            original,
            folded,
            fingerprint,
            line_count,
        }
    }

    /// Original-case text, used for rendering
    #[inline]
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// Case-folded text, used for matching
    #[inline]
    pub fn folded(&self) -> &[u8] {
        &self.folded
    }

    /// Length in bytes (identical for both forms)
    #[inline]
    pub fn len(&self) -> usize {
        self.folded.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Hash of the original bytes, used to tie a persisted index to this text
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of lines (a trailing line without `\n` counts)
    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

fn count_lines(text: &[u8]) -> usize {
    let newlines = memchr::memchr_iter(b'\n', text).count();
    match text.last() {
        Some(&b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Fold ASCII letters to lowercase
///
/// Non-ASCII bytes pass through untouched so the output has exactly the
/// input's length and every offset stays valid against the original.
pub fn fold_case(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b.to_ascii_lowercase()).collect()
}

/// 64-bit fingerprint of a byte string
///
/// The first eight bytes of its BLAKE3 digest, so the value is the same
/// across builds and platforms.
pub fn fingerprint(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}
