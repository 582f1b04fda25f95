//! Package requirements: a name plus the versions it accepts.

use std::fmt;

use super::constraint::VersionConstraint;
use super::package::{PackageError, PackageId, PackageName};

/// "Give me package `name` at a version matching `constraint`"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: PackageName,
    pub constraint: VersionConstraint,
}

impl Requirement {
    /// Create a new requirement
    pub fn new(name: PackageName, constraint: VersionConstraint) -> Self {
        Self { name, constraint }
    }

    /// Parse a requirement from its raw name and constraint text
    pub fn parse(name: &str, constraint: &str) -> Result<Self, PackageError> {
        Ok(Self::new(
            PackageName::new(name)?,
            VersionConstraint::parse(constraint)?,
        ))
    }

    /// Check if a concrete package satisfies this requirement
    pub fn matches(&self, id: &PackageId) -> bool {
        self.name == id.name && self.constraint.matches(&id.version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(ver {})", self.name, self.constraint)
    }
}
