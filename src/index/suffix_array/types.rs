//! Types for suffix array indexing
//!
//! This module defines the core types used for suffix array-based search,
//! which provides O(m log n) exact substring matching.

use serde::{Deserialize, Serialize};

/// Suffix array entry - byte position in the folded corpus
pub type SuffixEntry = u64;

/// Magic number for suffix array files
pub const SA_MAGIC: u32 = 0x41534F46; // "FOSA" in little-endian

/// Current version of the suffix array format
pub const SA_VERSION: u32 = 1;

/// Name of the persisted suffix array inside an index directory
pub const SA_FILE_NAME: &str = "sa.bin";

/// Suffixes are ordered by at most this many leading bytes.
///
/// Suffixes sharing a longer prefix sort as equal, so lookups for longer
/// queries narrow on this prefix and then verify each candidate.
pub const MAX_COMPARE: usize = 256;

/// Texts larger than this are sorted with rayon
pub const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// Header for sa.bin file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixArrayHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Number of suffix entries (equals corpus length)
    pub suffix_count: u64,
    /// Fingerprint of the corpus the array was built from
    pub fingerprint: u64,
    /// Flags (reserved for future use)
    pub flags: u32,
}

impl SuffixArrayHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 8 + 8 + 4; // 28 bytes

    pub fn new(suffix_count: u64, fingerprint: u64) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            suffix_count,
            fingerprint,
            flags: 0,
        }
    }

    /// Serialize to little-endian bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.suffix_count.to_le_bytes());
        buf[16..24].copy_from_slice(&self.fingerprint.to_le_bytes());
        buf[24..28].copy_from_slice(&self.flags.to_le_bytes());
        buf
    }

    /// Parse from the start of a buffer; `None` if it is too short
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            magic: u32::from_le_bytes(data[0..4].try_into().ok()?),
            version: u32::from_le_bytes(data[4..8].try_into().ok()?),
            suffix_count: u64::from_le_bytes(data[8..16].try_into().ok()?),
            fingerprint: u64::from_le_bytes(data[16..24].try_into().ok()?),
            flags: u32::from_le_bytes(data[24..28].try_into().ok()?),
        })
    }
}

/// Suffix array metadata reported by `folio stats` and `/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuffixArrayMeta {
    /// Number of suffixes (equals corpus size)
    pub suffix_count: u64,
    /// Fingerprint of the indexed corpus
    pub fingerprint: u64,
    /// Whether the array is memory-mapped from a persisted file
    pub persisted: bool,
}
