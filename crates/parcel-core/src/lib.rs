//! # parcel-core
//!
//! Core types shared across all Parcel crates.
//!
//! This crate provides:
//! - `Version`, the two-component `major.minor` release number
//! - `VersionConstraint` and its compact textual grammar
//! - `PackageName`, `PackageId` and `Requirement` for package identification
//! - `ParcelError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, VersionConstraint, PackageId, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ParcelError, ParcelResult};
pub use types::{
    Comparator, Op, PackageError, PackageId, PackageName, Requirement, Version,
    VersionConstraint, VersionError,
};
