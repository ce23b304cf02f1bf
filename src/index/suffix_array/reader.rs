//! Suffix array lookups
//!
//! A [`SuffixArray`] is either built in memory or memory-mapped from a
//! persisted `sa.bin`. Either way it answers "where does this substring
//! occur" with two binary searches over the sorted suffixes.

use super::types::*;
use crate::error::{FolioError, Result};
use crate::index::corpus::{fold_case, Corpus};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Storage for the sorted suffix positions
enum SuffixStore {
    Owned(Vec<SuffixEntry>),
    /// Whole sa.bin file, header included
    Mapped(Mmap),
}

/// Sorted suffix positions over a folded corpus
pub struct SuffixArray {
    store: SuffixStore,
    suffix_count: u64,
    fingerprint: u64,
}

impl SuffixArray {
    pub(crate) fn from_entries(entries: Vec<SuffixEntry>, fingerprint: u64) -> Self {
        Self {
            suffix_count: entries.len() as u64,
            store: SuffixStore::Owned(entries),
            fingerprint,
        }
    }

    /// Open a persisted suffix array for `corpus`
    ///
    /// Returns `Ok(None)` if the file does not exist. A file built from
    /// different text is rejected with [`FolioError::StaleIndex`].
    pub fn open(path: &Path, corpus: &Corpus) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let header = SuffixArrayHeader::from_bytes(&mmap)
            .ok_or_else(|| FolioError::InvalidIndex("sa.bin: file too small".to_string()))?;

        if header.magic != SA_MAGIC {
            return Err(FolioError::InvalidIndex("sa.bin: bad magic number".to_string()));
        }

        if header.version != SA_VERSION {
            return Err(FolioError::InvalidIndex(format!(
                "sa.bin: unsupported version {}",
                header.version
            )));
        }

        let expected_len = SuffixArrayHeader::SIZE as u64 + header.suffix_count * 8;
        if mmap.len() as u64 != expected_len {
            return Err(FolioError::InvalidIndex(format!(
                "sa.bin: expected {} bytes, found {}",
                expected_len,
                mmap.len()
            )));
        }

        if header.fingerprint != corpus.fingerprint() || header.suffix_count != corpus.len() as u64
        {
            return Err(FolioError::StaleIndex {
                expected: corpus.fingerprint(),
                found: header.fingerprint,
            });
        }

        let sa = Self {
            store: SuffixStore::Mapped(mmap),
            suffix_count: header.suffix_count,
            fingerprint: header.fingerprint,
        };

        // Lookups slice the text at every entry
        if let Some(pos) = sa.entries().find(|&pos| pos >= sa.suffix_count) {
            return Err(FolioError::InvalidIndex(format!(
                "sa.bin: suffix position {} past end of {}-byte corpus",
                pos, sa.suffix_count
            )));
        }

        Ok(Some(sa))
    }

    /// Get suffix at index i in the suffix array
    #[inline]
    fn get_suffix(&self, i: u64) -> SuffixEntry {
        match &self.store {
            SuffixStore::Owned(entries) => entries[i as usize],
            SuffixStore::Mapped(mmap) => {
                let byte_offset = SuffixArrayHeader::SIZE + (i as usize * 8);
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&mmap[byte_offset..byte_offset + 8]);
                u64::from_le_bytes(buf)
            }
        }
    }

    /// Iterate over suffix positions in sorted order
    pub fn entries(&self) -> impl Iterator<Item = SuffixEntry> + '_ {
        (0..self.suffix_count).map(move |i| self.get_suffix(i))
    }

    pub fn len(&self) -> usize {
        self.suffix_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.suffix_count == 0
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.store, SuffixStore::Mapped(_))
    }

    /// Find every byte offset where `query` occurs, ignoring ASCII case
    ///
    /// Offsets come back in suffix order, not text order. An empty query
    /// has no occurrences.
    pub fn lookup(&self, corpus: &Corpus, query: &[u8]) -> Vec<usize> {
        if query.is_empty() || self.is_empty() {
            return Vec::new();
        }

        let pattern = fold_case(query);
        let text = corpus.folded();
        let (lo, hi) = self.search(text, &pattern);

        let needs_verify = pattern.len() > MAX_COMPARE;
        let mut offsets = Vec::with_capacity((hi - lo) as usize);

        for i in lo..hi {
            let pos = self.get_suffix(i) as usize;
            if !needs_verify || text[pos..].starts_with(&pattern) {
                offsets.push(pos);
            }
        }

        offsets
    }

    /// Get the number of occurrences of a query
    pub fn count_matches(&self, corpus: &Corpus, query: &[u8]) -> usize {
        if query.len() > MAX_COMPARE {
            return self.lookup(corpus, query).len();
        }
        if query.is_empty() || self.is_empty() {
            return 0;
        }

        let (lo, hi) = self.search(corpus.folded(), &fold_case(query));
        (hi - lo) as usize
    }

    /// Check if a query occurs anywhere in the corpus
    pub fn contains(&self, corpus: &Corpus, query: &[u8]) -> bool {
        self.count_matches(corpus, query) > 0
    }

    /// Returns the range [lo, hi) of indices in the suffix array whose
    /// suffixes start with the pattern's first `MAX_COMPARE` bytes.
    fn search(&self, text: &[u8], pattern: &[u8]) -> (u64, u64) {
        let prefix = &pattern[..pattern.len().min(MAX_COMPARE)];
        let lo = self.lower_bound(text, prefix);
        let hi = self.upper_bound(text, prefix, lo);
        (lo, hi)
    }

    /// Find first index where suffix starts with pattern (or would if inserted)
    fn lower_bound(&self, text: &[u8], pattern: &[u8]) -> u64 {
        let mut lo: u64 = 0;
        let mut hi: u64 = self.suffix_count;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = &text[self.get_suffix(mid) as usize..];

            // Compare only up to pattern length
            let cmp_len = pattern.len().min(suffix.len());
            if &suffix[..cmp_len] < pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Find first index at or after `start` where suffix does NOT start with pattern
    fn upper_bound(&self, text: &[u8], pattern: &[u8], start: u64) -> u64 {
        let mut lo = start;
        let mut hi: u64 = self.suffix_count;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = &text[self.get_suffix(mid) as usize..];

            if suffix.starts_with(pattern) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Get metadata about this suffix array
    pub fn meta(&self) -> SuffixArrayMeta {
        SuffixArrayMeta {
            suffix_count: self.suffix_count,
            fingerprint: self.fingerprint,
            persisted: self.is_persisted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_array::builder::SuffixArrayBuilder;
    use crate::index::suffix_array::writer::SuffixArrayWriter;
    use tempfile::tempdir;

    fn sorted(mut offsets: Vec<usize>) -> Vec<usize> {
        offsets.sort_unstable();
        offsets
    }

    #[test]
    fn test_lookup_basic() {
        let corpus = Corpus::from_bytes("the cat sat\non the mat\n");
        let sa = SuffixArrayBuilder::build(&corpus);

        assert_eq!(sorted(sa.lookup(&corpus, b"at")), vec![5, 9, 20]);
        assert_eq!(sorted(sa.lookup(&corpus, b"the")), vec![0, 15]);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let corpus = Corpus::from_bytes("To be, or NOT to be");
        let sa = SuffixArrayBuilder::build(&corpus);

        assert_eq!(sorted(sa.lookup(&corpus, b"TO BE")), vec![0, 14]);
        assert_eq!(sa.lookup(&corpus, b"not"), vec![10]);
    }

    #[test]
    fn test_lookup_no_match() {
        let corpus = Corpus::from_bytes("hello world");
        let sa = SuffixArrayBuilder::build(&corpus);

        assert!(sa.lookup(&corpus, b"zzz").is_empty());
        assert!(sa.lookup(&corpus, b"").is_empty());
        assert!(!sa.contains(&corpus, b"worlds"));
    }

    #[test]
    fn test_lookup_overlapping() {
        let corpus = Corpus::from_bytes("aaaa");
        let sa = SuffixArrayBuilder::build(&corpus);

        assert_eq!(sorted(sa.lookup(&corpus, b"aa")), vec![0, 1, 2]);
        assert_eq!(sa.count_matches(&corpus, b"aa"), 3);
    }

    #[test]
    fn test_lookup_longer_than_compare_window() {
        let line = "x".repeat(MAX_COMPARE + 10);
        let text = format!("{line}A\n{line}B\n{line}A\n");
        let corpus = Corpus::from_bytes(text.clone());
        let sa = SuffixArrayBuilder::build(&corpus);

        let query = format!("{line}a");
        let offsets = sorted(sa.lookup(&corpus, query.as_bytes()));
        assert_eq!(offsets, vec![0, 2 * (line.len() + 2)]);
        assert_eq!(sa.count_matches(&corpus, query.as_bytes()), 2);
    }

    #[test]
    fn test_open_persisted() {
        let dir = tempdir().unwrap();
        let corpus = Corpus::from_bytes("hello world\nworld hello\n");
        let built = SuffixArrayBuilder::build(&corpus);
        let path = SuffixArrayWriter::write(dir.path(), &built).unwrap();

        let sa = SuffixArray::open(&path, &corpus).unwrap().unwrap();
        assert!(sa.is_persisted());
        assert_eq!(sa.len(), corpus.len());
        assert_eq!(sa.entries().collect::<Vec<_>>(), built.entries().collect::<Vec<_>>());
        assert_eq!(sorted(sa.lookup(&corpus, b"HELLO")), vec![0, 18]);
    }

    #[test]
    fn test_open_missing_returns_none() {
        let dir = tempdir().unwrap();
        let corpus = Corpus::from_bytes("abc");
        let sa = SuffixArray::open(&dir.path().join(SA_FILE_NAME), &corpus).unwrap();
        assert!(sa.is_none());
    }

    #[test]
    fn test_open_stale() {
        let dir = tempdir().unwrap();
        let old = Corpus::from_bytes("first edition");
        let path = SuffixArrayWriter::write(dir.path(), &SuffixArrayBuilder::build(&old)).unwrap();

        let new = Corpus::from_bytes("second edition");
        let err = SuffixArray::open(&path, &new).err().unwrap();
        assert!(matches!(err, FolioError::StaleIndex { .. }));
    }

    #[test]
    fn test_open_damaged_body() {
        let dir = tempdir().unwrap();
        let corpus = Corpus::from_bytes("to be or not to be");
        let path = SuffixArrayWriter::write(dir.path(), &SuffixArrayBuilder::build(&corpus)).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 8;
        bytes[last..].copy_from_slice(&u64::MAX.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();

        let err = SuffixArray::open(&path, &corpus).err().unwrap();
        assert!(matches!(err, FolioError::InvalidIndex(_)));
        assert!(err.is_rebuildable());
    }

    #[test]
    fn test_open_bad_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SA_FILE_NAME);
        std::fs::write(&path, vec![0u8; SuffixArrayHeader::SIZE]).unwrap();

        let corpus = Corpus::from_bytes("");
        let err = SuffixArray::open(&path, &corpus).err().unwrap();
        assert!(matches!(err, FolioError::InvalidIndex(_)));
    }
}
