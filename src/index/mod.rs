pub mod build;
pub mod corpus;
pub mod stats;
pub mod suffix_array;

pub use build::{build_index, load_searcher, open_index};
pub use corpus::{fold_case, Corpus};
pub use suffix_array::{SuffixArray, SuffixArrayBuilder, SuffixArrayWriter};
