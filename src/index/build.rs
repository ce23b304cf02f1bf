//! Startup index loading
//!
//! The suffix array is either memory-mapped from a persisted `sa.bin`
//! written by `folio index`, or built in memory when none exists. A
//! persisted file built from another version of the corpus is ignored and
//! the array is rebuilt.

use crate::index::corpus::Corpus;
use crate::index::suffix_array::{SuffixArray, SuffixArrayBuilder, SuffixArrayWriter, SA_FILE_NAME};
use crate::query::{SearchOptions, Searcher};
use crate::utils::Spinner;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Build the suffix array for a corpus file and persist it to `index_dir`
///
/// Returns the path of the written `sa.bin`.
pub fn build_index(corpus_path: &Path, index_dir: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    let corpus = Corpus::open(corpus_path)?;

    let spinner = Spinner::start(&format!(
        "Indexing {} ({} bytes)...",
        corpus_path.display(),
        corpus.len()
    ));

    let sa = SuffixArrayBuilder::build(&corpus);
    spinner.set_message("Writing suffix array...".to_string());

    let path = SuffixArrayWriter::write(index_dir, &sa)
        .with_context(|| format!("Failed to write index to {}", index_dir.display()))?;

    spinner.finish(format!(
        "Indexed {} suffixes in {:.2}s",
        sa.len(),
        start.elapsed().as_secs_f64()
    ));

    Ok(path)
}

/// Open the persisted suffix array for `corpus`, or build one in memory
pub fn open_index(corpus: &Corpus, index_dir: Option<&Path>) -> Result<SuffixArray> {
    if let Some(dir) = index_dir {
        let path = dir.join(SA_FILE_NAME);
        match SuffixArray::open(&path, corpus) {
            Ok(Some(sa)) => {
                info!("using persisted index {}", path.display());
                return Ok(sa);
            }
            Ok(None) => {}
            Err(e) if e.is_rebuildable() => {
                warn!("ignoring persisted index {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", path.display()));
            }
        }
    }

    let start = Instant::now();
    let spinner = Spinner::start("Building suffix array...");
    let sa = SuffixArrayBuilder::build(corpus);
    spinner.finish(format!(
        "Built suffix array in {:.2}s",
        start.elapsed().as_secs_f64()
    ));

    Ok(sa)
}

/// Load the corpus and its index, ready to search
///
/// This is the single startup step: any failure here is fatal for the caller.
pub fn load_searcher(
    corpus_path: &Path,
    index_dir: Option<&Path>,
    options: SearchOptions,
) -> Result<Searcher> {
    let corpus = Corpus::open(corpus_path)
        .with_context(|| format!("Failed to load corpus {}", corpus_path.display()))?;

    info!(
        "loaded corpus {} ({} bytes, {} lines)",
        corpus_path.display(),
        corpus.len(),
        corpus.line_count()
    );

    let index = open_index(&corpus, index_dir)?;
    Ok(Searcher::with_index(corpus, index, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_then_load_persisted() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("works.txt");
        let index_dir = dir.path().join("index");
        fs::write(&corpus_path, "Romeo and Juliet\nJuliet's nurse\n").unwrap();

        let sa_path = build_index(&corpus_path, &index_dir).unwrap();
        assert!(sa_path.exists());

        let searcher =
            load_searcher(&corpus_path, Some(&index_dir), SearchOptions::default()).unwrap();
        assert!(searcher.index().is_persisted());
        assert_eq!(searcher.search("juliet").len(), 1);
    }

    #[test]
    fn test_stale_persisted_index_is_rebuilt() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("works.txt");
        let index_dir = dir.path().join("index");

        fs::write(&corpus_path, "first draft\n").unwrap();
        build_index(&corpus_path, &index_dir).unwrap();

        fs::write(&corpus_path, "final folio edition\n").unwrap();
        let searcher =
            load_searcher(&corpus_path, Some(&index_dir), SearchOptions::default()).unwrap();

        assert!(!searcher.index().is_persisted());
        assert_eq!(searcher.locate("folio"), vec![6]);
    }

    #[test]
    fn test_damaged_persisted_index_is_rebuilt() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("works.txt");
        let index_dir = dir.path().join("index");
        fs::write(&corpus_path, "now cracks a noble heart\n").unwrap();
        let sa_path = build_index(&corpus_path, &index_dir).unwrap();

        let mut bytes = fs::read(&sa_path).unwrap();
        let last = bytes.len() - 8;
        bytes[last..].copy_from_slice(&1_000_000u64.to_le_bytes());
        fs::write(&sa_path, bytes).unwrap();

        let searcher =
            load_searcher(&corpus_path, Some(&index_dir), SearchOptions::default()).unwrap();
        assert!(!searcher.index().is_persisted());
        assert_eq!(searcher.locate("NOBLE"), vec![13]);
    }

    #[test]
    fn test_corpus_file_edits_after_load_are_ignored() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("works.txt");
        fs::write(&corpus_path, "Enter HAMLET.\nExit GHOST.\n").unwrap();

        let searcher = load_searcher(&corpus_path, None, SearchOptions::default()).unwrap();
        let before = searcher.search("hamlet");

        fs::write(&corpus_path, "Enter OTHELO.\nExit IAGO!!.\n").unwrap();
        assert_eq!(searcher.search("hamlet"), before);

        fs::write(&corpus_path, "short\n").unwrap();
        assert_eq!(searcher.search("hamlet"), before);
        assert_eq!(searcher.search("ghost").len(), 1);
    }

    #[test]
    fn test_load_without_index_dir() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("works.txt");
        fs::write(&corpus_path, "exit, pursued by a bear\n").unwrap();

        let searcher = load_searcher(&corpus_path, None, SearchOptions::default()).unwrap();
        assert!(!searcher.index().is_persisted());
        assert_eq!(searcher.locate("BEAR"), vec![19]);
    }

    #[test]
    fn test_missing_corpus_is_fatal() {
        let dir = tempdir().unwrap();
        let result = load_searcher(&dir.path().join("nope.txt"), None, SearchOptions::default());
        assert!(result.is_err());
    }
}
