use std::path::PathBuf;
use thiserror::Error;

/// Main error type for folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Corpus unavailable at {path}: {source}")]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Index was built for a different corpus (fingerprint {found:#018x}, expected {expected:#018x})")]
    StaleIndex { expected: u64, found: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

impl FolioError {
    /// Whether the failure can be recovered from by rebuilding the index in memory
    pub fn is_rebuildable(&self) -> bool {
        matches!(self, FolioError::InvalidIndex(_) | FolioError::StaleIndex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::InvalidIndex("bad magic number".to_string());
        assert_eq!(err.to_string(), "Invalid index: bad magic number");

        let err = FolioError::StaleIndex {
            expected: 1,
            found: 2,
        };
        assert!(err.to_string().contains("0x0000000000000001"));
    }

    #[test]
    fn test_rebuildable() {
        assert!(FolioError::InvalidIndex("x".into()).is_rebuildable());
        assert!(FolioError::StaleIndex { expected: 0, found: 1 }.is_rebuildable());
        assert!(!FolioError::Config("x".into()).is_rebuildable());
    }
}
