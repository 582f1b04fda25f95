//! Core data types for Parcel package management.
//!
//! This module provides the fundamental types used throughout Parcel:
//! - Version and version constraint types
//! - Package names and concrete package identifiers
//! - Requirements (a package name plus an acceptable version range)

pub mod constraint;
pub mod package;
pub mod requirement;
pub mod version;

// Re-export all public types
pub use constraint::{Comparator, Op, VersionConstraint};
pub use package::{PackageError, PackageId, PackageName};
pub use requirement::Requirement;
pub use version::{Version, VersionError};
