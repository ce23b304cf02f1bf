//! Suffix array writer
//!
//! Writes a suffix array to disk in a format optimized for memory-mapped
//! reading: a fixed header followed by little-endian u64 positions.

use super::reader::SuffixArray;
use super::types::*;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes suffix array files to an index directory
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write `sa.bin` into `index_dir`, returning its path
    ///
    /// The file is written under a temporary name and renamed into place so
    /// a reader never maps a half-written array.
    pub fn write(index_dir: &Path, sa: &SuffixArray) -> Result<PathBuf> {
        fs::create_dir_all(index_dir)?;

        let path = index_dir.join(SA_FILE_NAME);
        let tmp_path = index_dir.join(format!("{SA_FILE_NAME}.tmp"));

        {
            let mut file = BufWriter::with_capacity(65536, File::create(&tmp_path)?);

            let header = SuffixArrayHeader::new(sa.len() as u64, sa.fingerprint());
            file.write_all(&header.to_bytes())?;

            // Using a buffer to reduce system call overhead
            let mut buffer = Vec::with_capacity(8 * 1024); // 1024 entries at a time
            for entry in sa.entries() {
                buffer.extend_from_slice(&entry.to_le_bytes());
                if buffer.len() >= 8 * 1024 {
                    file.write_all(&buffer)?;
                    buffer.clear();
                }
            }
            if !buffer.is_empty() {
                file.write_all(&buffer)?;
            }

            file.flush()?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::corpus::Corpus;
    use crate::index::suffix_array::builder::SuffixArrayBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_write_suffix_array() {
        let temp_dir = tempdir().unwrap();
        let index_dir = temp_dir.path().join("works");

        let corpus = Corpus::from_bytes("banana");
        let built = SuffixArrayBuilder::build(&corpus);
        let path = SuffixArrayWriter::write(&index_dir, &built).unwrap();

        assert_eq!(path, index_dir.join(SA_FILE_NAME));
        assert!(!index_dir.join("sa.bin.tmp").exists());

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), SuffixArrayHeader::SIZE + 6 * 8);

        let header = SuffixArrayHeader::from_bytes(&data).unwrap();
        assert_eq!(header.magic, SA_MAGIC);
        assert_eq!(header.suffix_count, 6);
        assert_eq!(header.fingerprint, corpus.fingerprint());

        // First entry is the suffix "a" at position 5
        let first = u64::from_le_bytes(
            data[SuffixArrayHeader::SIZE..SuffixArrayHeader::SIZE + 8]
                .try_into()
                .unwrap(),
        );
        assert_eq!(first, 5);
    }
}
