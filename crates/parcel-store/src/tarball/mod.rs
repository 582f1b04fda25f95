//! Package archive creation and extraction
//!
//! Packages are stored as gzip-compressed tar archives whose entry paths are
//! relative to the directory the package was built from.

pub mod create;
pub mod extract;

// Re-export main functions
pub use create::{create_archive, create_archive_file};
pub use extract::{extract_archive, ExtractReport};
