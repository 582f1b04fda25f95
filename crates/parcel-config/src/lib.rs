//! Configuration parsing for Parcel
//!
//! This crate loads the two command configurations (`update` and `create`)
//! from JSON, YAML or TOML files and the per-user store settings from
//! `~/.parcel.json`, validating everything into core types up front.

pub mod create;
pub mod loader;
pub mod store;
pub mod update;

// Re-export main types
pub use create::{CreateConfig, Target};
pub use loader::{load_document, ConfigFormat};
pub use store::{StoreFile, StoreSettings};
pub use update::{RequirementSpec, UpdateConfig};

use parcel_core::error::ParcelError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ParcelError>;
