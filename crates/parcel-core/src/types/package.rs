//! Package names and concrete package identifiers.
//!
//! A `PackageId` is what a stored archive is called: `<name>-<major>.<minor>`,
//! optionally followed by an archive suffix in the store listing.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::version::{Version, VersionError};

/// Archive suffixes tolerated on stored package file names
const ARCHIVE_SUFFIXES: [&str; 2] = [".tar.gz", ".tgz"];

/// Validated package name (ASCII letters, digits, `_` and `-`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

/// Concrete package: a name at one exact version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    pub name: PackageName,
    pub version: Version,
}

/// Package name and identifier errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    #[error("Invalid package name {name:?}: only letters, digits, '_' and '-' are allowed")]
    InvalidName { name: String },

    #[error("Invalid package identifier {input:?}: expected <name>-<major>.<minor>")]
    InvalidIdentifier { input: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

impl PackageName {
    /// Create a validated package name
    pub fn new(name: impl Into<String>) -> Result<Self, PackageError> {
        let name = name.into();
        if !Self::is_valid(&name) {
            return Err(PackageError::InvalidName { name });
        }
        Ok(Self(name))
    }

    /// Check if a string is a valid package name
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PackageName {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PackageId {
    /// Create a new package ID
    pub fn new(name: PackageName, version: Version) -> Self {
        Self { name, version }
    }

    /// Parse a stored file name such as `foo-1.2` or `my-lib-0.3.tar.gz`.
    ///
    /// The name/version split happens on the last hyphen, so names may
    /// themselves contain hyphens.
    pub fn from_file_name(file_name: &str) -> Result<Self, PackageError> {
        let stem = ARCHIVE_SUFFIXES
            .iter()
            .find_map(|suffix| file_name.strip_suffix(suffix))
            .unwrap_or(file_name);

        let (name, version) =
            stem.rsplit_once('-')
                .ok_or_else(|| PackageError::InvalidIdentifier {
                    input: file_name.to_string(),
                })?;

        let name = PackageName::new(name)?;
        let version = version.parse()?;
        Ok(Self::new(name, version))
    }
}

impl FromStr for PackageId {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_file_name(s)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}
