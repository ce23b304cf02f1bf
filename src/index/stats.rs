use crate::index::build::open_index;
use crate::index::corpus::Corpus;
use crate::index::suffix_array::SA_FILE_NAME;
use anyhow::{Context, Result};
use std::path::Path;

/// Display corpus and index statistics
pub fn show_stats(corpus_path: &Path, index_dir: &Path) -> Result<()> {
    let corpus = Corpus::open(corpus_path)
        .with_context(|| format!("Failed to load corpus {}", corpus_path.display()))?;
    let sa = open_index(&corpus, Some(index_dir))?;
    let meta = sa.meta();

    println!("Corpus Statistics");
    println!("=================");
    println!();
    println!("Corpus path:      {}", corpus_path.display());
    println!("Corpus size:      {}", format_size(corpus.len() as u64));
    println!("Line count:       {}", corpus.line_count());
    println!("Fingerprint:      {:016x}", corpus.fingerprint());
    println!();
    println!("Index location:   {}", index_dir.display());
    println!("Suffix count:     {}", meta.suffix_count);
    println!(
        "Persisted:        {}",
        if meta.persisted { "yes" } else { "no (built in memory)" }
    );

    if let Ok(metadata) = std::fs::metadata(index_dir.join(SA_FILE_NAME)) {
        println!("Index size:       {}", format_size(metadata.len()));
    }

    Ok(())
}

/// Format byte size to human readable
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
