//! Package store access for Parcel
//!
//! This crate moves package archives between the working directory and the
//! package store: listing and transferring stored archives, building the
//! tar+gzip archive for a new package, and unpacking fetched ones.

pub mod targets;
pub mod tarball;
pub mod transport;

// Re-export main types
pub use targets::collect_targets;
pub use tarball::{create_archive, create_archive_file, extract_archive, ExtractReport};
pub use transport::{DirectoryStore, PackageStore};

use parcel_core::error::ParcelError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ParcelError>;
