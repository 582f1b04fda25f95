//! Error types and result aliases for Parcel operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the Parcel crates with actionable error messages.

use thiserror::Error;

use crate::types::{PackageError, Requirement, VersionError};

/// Unified error type for all Parcel operations
#[derive(Error, Debug)]
pub enum ParcelError {
    // Parse errors
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Package(#[from] PackageError),

    // Config errors
    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Unsupported configuration format '{extension}'")]
    UnsupportedConfigFormat { extension: String },

    #[error("Duplicate package requirement {requirement}")]
    DuplicateRequirement { requirement: Requirement },

    // Resolution errors
    #[error("Packages not found: {}", join_requirements(.unsatisfied))]
    ResolutionFailed { unsatisfied: Vec<Requirement> },

    // Store errors
    #[error("Package {name} already exists in the store")]
    PackageExists { name: String },

    #[error("Package store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Parcel operations
pub type ParcelResult<T> = Result<T, ParcelError>;

fn join_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|req| req.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParcelError {
    /// Create a store error from any error type
    pub fn store<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a config validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParcelError::Store { .. } | ParcelError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ParcelError::Version(_) => Some(
                "Versions look like '1.2'; constraints like '1.2', '>=1.2', '>1.0 <=2.0' or '1.0 - 2.0'",
            ),
            ParcelError::Package(PackageError::InvalidName { .. }) => {
                Some("Package names may only contain letters, digits, '_' and '-'")
            },
            ParcelError::UnsupportedConfigFormat { .. } => {
                Some("Use a .json, .yaml, .yml or .toml configuration file")
            },
            ParcelError::DuplicateRequirement { .. } => {
                Some("Remove the repeated entry from the packages list")
            },
            ParcelError::ResolutionFailed { .. } => {
                Some("Run 'parcel list' to see which package versions are available")
            },
            ParcelError::PackageExists { .. } => {
                Some("Bump 'ver' in the create config; published packages are never overwritten")
            },
            ParcelError::Store { .. } => Some("Check the store path and its permissions"),
            _ => None,
        }
    }
}
