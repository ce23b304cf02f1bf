//! Utility functions and data structures.
//!
//! - [`app_data`] - Configuration and app data directory management (XDG-compliant)
//! - [`progress`] - Build spinner, silent without the `progress` feature

pub mod app_data;
pub mod progress;

pub use app_data::*;
pub use progress::Spinner;
