pub mod grouper;
pub mod searcher;
pub mod snippet;

pub use grouper::{group_offsets, merge_tolerance, MatchGroup};
pub use searcher::{SearchOptions, Searcher, DEFAULT_LOOKAROUND};
pub use snippet::{Highlight, SnippetFormatter};
