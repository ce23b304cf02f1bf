use crate::error::{FolioError, Result};
use crate::query::{Highlight, SearchOptions, DEFAULT_LOOKAROUND};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "folio";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the app data directory
pub const HOME_ENV: &str = "FOLIO_HOME";

/// Application configuration stored in the app data directory
///
/// Every field has a default, so a partial (or absent) config file is fine.
/// Command-line flags and environment variables override these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Text file to search
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Directory served at `/`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bytes of context around each match group
    #[serde(default = "default_lookaround")]
    pub lookaround: usize,

    #[serde(default = "default_highlight_open")]
    pub highlight_open: String,

    #[serde(default = "default_highlight_close")]
    pub highlight_close: String,

    /// Number of query results kept by the server (0 disables the cache)
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("completeworks.txt")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_port() -> u16 {
    3001
}

fn default_lookaround() -> usize {
    DEFAULT_LOOKAROUND
}

fn default_highlight_open() -> String {
    Highlight::STRONG_OPEN.to_string()
}

fn default_highlight_close() -> String {
    Highlight::STRONG_CLOSE.to_string()
}

fn default_cache_size() -> usize {
    128
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            static_dir: default_static_dir(),
            port: default_port(),
            lookaround: default_lookaround(),
            highlight_open: default_highlight_open(),
            highlight_close: default_highlight_close(),
            cache_size: default_cache_size(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from an explicit file, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            FolioError::Config(format!("failed to parse {}: {}", config_path.display(), e))
        })
    }

    /// Save config to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FolioError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// The slice of the config the search core needs
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            lookaround: self.lookaround,
            highlight: Highlight::new(&self.highlight_open, &self.highlight_close),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory for storing config and indexes
pub fn get_app_data_dir() -> Result<PathBuf> {
    let app_dir = match std::env::var_os(HOME_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base = if cfg!(target_os = "macos") {
                dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
            } else if cfg!(target_os = "windows") {
                dirs::data_local_dir()
            } else {
                // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
                dirs::data_dir()
            };

            base.ok_or_else(|| {
                FolioError::Config("could not determine app data directory".to_string())
            })?
            .join(APP_NAME)
        }
    };

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the persisted index directory for a corpus file
pub fn get_index_dir(corpus_path: &Path) -> Result<PathBuf> {
    let indexes_dir = get_app_data_dir()?.join("indexes");
    fs::create_dir_all(&indexes_dir)?;
    Ok(indexes_dir.join(hash_path(corpus_path)))
}

/// Remove the persisted index for a corpus file
///
/// Returns whether anything was removed.
pub fn remove_index(corpus_path: &Path) -> Result<bool> {
    let index_dir = get_index_dir(corpus_path)?;
    if index_dir.exists() {
        fs::remove_dir_all(&index_dir)?;
        return Ok(true);
    }
    Ok(false)
}

/// Hash a path to create a unique folder name
/// Format: sanitized file stem + hash of the canonical path
fn hash_path(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let stem = canonical
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("corpus");

    let sanitized: String = stem
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(16)
        .collect();

    let mut hasher = DefaultHasher::new();
    canonical.to_string_lossy().hash(&mut hasher);

    format!("{}-{:016x}", sanitized, hasher.finish())
}
