//! # folio - Snippet search over a single text
//!
//! folio answers case-insensitive substring queries against one immutable
//! corpus (the complete works of an author, a manual, a log dump) and
//! returns the surrounding text of every match, with nearby matches merged
//! into one snippet and the matched text highlighted.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Corpus loading and the suffix array (build, persist, look up)
//! - [`query`] - Grouping of match offsets and snippet rendering
//! - [`server`] - HTTP API and static file serving
//! - [`output`] - Terminal rendering of snippets
//! - [`utils`] - Configuration and app data directories
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::index::Corpus;
//! use folio::query::{SearchOptions, Searcher};
//!
//! let corpus = Corpus::from_bytes("the cat sat\non the mat\n");
//! let searcher = Searcher::new(corpus, SearchOptions::default());
//!
//! for snippet in searcher.search("at") {
//!     println!("{}", snippet);
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Index** - a suffix array over the ASCII case-folded corpus
//! 2. **Lookup** - two binary searches yield every occurrence offset
//! 3. **Group** - offsets whose context windows would overlap are chained
//! 4. **Format** - each group becomes one line-trimmed, highlighted snippet

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod server;
pub mod utils;

pub use error::{FolioError, Result};
