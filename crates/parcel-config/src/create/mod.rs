//! Create configuration: how to build and publish a package
//!
//! ```yaml
//! name: my-lib
//! ver: "1.2"
//! targets:
//!   - ./src/*.rs
//!   - path: ./assets
//!     exclude: "*.tmp"
//! dependencies:
//!   - name: base
//!     ver: ">=1.0"
//! ```

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use parcel_core::error::ParcelError;
use parcel_core::types::{PackageId, PackageName, Requirement, Version, VersionConstraint};

use crate::loader::load_document;
use crate::update::{build_requirements, RequirementSpec};
use crate::ConfigResult;

/// Files to include: a bare path/glob or a path with an exclusion pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Path or glob pattern
    Simple(String),

    /// Path or glob pattern with files to leave out
    Detailed {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude: Option<String>,
    },
}

/// Complete create configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfig {
    pub name: String,
    pub ver: String,
    pub targets: Vec<Target>,

    /// Packages fetched before the archive is built
    #[serde(default)]
    pub dependencies: Vec<RequirementSpec>,
}

impl Target {
    pub fn path(&self) -> &str {
        match self {
            Target::Simple(path) => path,
            Target::Detailed { path, .. } => path,
        }
    }

    pub fn exclude(&self) -> Option<&str> {
        match self {
            Target::Simple(_) => None,
            Target::Detailed { exclude, .. } => exclude.as_deref().filter(|e| !e.is_empty()),
        }
    }
}

impl CreateConfig {
    /// Load a create configuration from a JSON, YAML or TOML file
    pub async fn load(path: &Utf8Path) -> ConfigResult<Self> {
        load_document(path).await
    }

    /// Validate name, version and targets, returning the package to publish
    pub fn package_id(&self) -> ConfigResult<PackageId> {
        let name = PackageName::new(self.name.as_str())?;
        let version: Version = self.ver.parse()?;

        if let Some(index) = self.targets.iter().position(|t| t.path().is_empty()) {
            return Err(ParcelError::config(
                format!("targets[{}]", index),
                "target path is empty",
            ));
        }

        Ok(PackageId::new(name, version))
    }

    /// Validated dependencies, in file order
    pub fn requirements(&self, default: &VersionConstraint) -> ConfigResult<Vec<Requirement>> {
        build_requirements(&self.dependencies, default)
    }
}
