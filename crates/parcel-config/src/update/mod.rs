//! Update configuration: the packages to fetch into the working directory
//!
//! ```yaml
//! packages:
//!   - name: foo
//!     ver: ">=1.0"
//!   - name: bar        # no ver: the default constraint applies
//! ```

use std::collections::HashSet;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::info;

use parcel_core::error::ParcelError;
use parcel_core::types::{PackageName, Requirement, VersionConstraint};

use crate::loader::load_document;
use crate::ConfigResult;

/// Raw package entry as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub name: String,

    /// Version constraint text; missing or empty means "use the default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
}

/// Complete update configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default)]
    pub packages: Vec<RequirementSpec>,
}

impl RequirementSpec {
    pub fn new(name: impl Into<String>, ver: Option<&str>) -> Self {
        Self {
            name: name.into(),
            ver: ver.map(str::to_string),
        }
    }

    /// Validate into a requirement, substituting `default` for a missing constraint
    pub fn to_requirement(&self, default: &VersionConstraint) -> ConfigResult<Requirement> {
        let name = PackageName::new(self.name.as_str())?;

        let constraint = match self.ver.as_deref() {
            Some(ver) if !ver.is_empty() => VersionConstraint::parse(ver)?,
            _ => {
                info!("Using default version constraint {} for package {}", default, name);
                default.clone()
            },
        };

        Ok(Requirement::new(name, constraint))
    }
}

impl UpdateConfig {
    /// Load an update configuration from a JSON, YAML or TOML file
    pub async fn load(path: &Utf8Path) -> ConfigResult<Self> {
        load_document(path).await
    }

    /// Validate every entry and return the requirements in file order
    pub fn requirements(&self, default: &VersionConstraint) -> ConfigResult<Vec<Requirement>> {
        build_requirements(&self.packages, default)
    }
}

/// Validate package entries, rejecting structurally identical requirements.
///
/// Duplicates are judged after the default constraint is filled in, so an
/// entry without `ver` collides with one spelling out the default.
pub(crate) fn build_requirements(
    specs: &[RequirementSpec],
    default: &VersionConstraint,
) -> ConfigResult<Vec<Requirement>> {
    let mut seen = HashSet::with_capacity(specs.len());
    let mut requirements = Vec::with_capacity(specs.len());

    for spec in specs {
        let requirement = spec.to_requirement(default)?;
        if !seen.insert(requirement.clone()) {
            return Err(ParcelError::DuplicateRequirement { requirement });
        }
        requirements.push(requirement);
    }

    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ConfigFormat;
    use camino::Utf8PathBuf;
    use parcel_core::types::VersionError;
    use tempfile::TempDir;

    fn default_constraint() -> VersionConstraint {
        VersionConstraint::parse(">=0.1").unwrap()
    }

    #[test]
    fn test_requirements_in_file_order() {
        let config: UpdateConfig = ConfigFormat::Json
            .parse(
                r#"{"packages": [{"name": "foo", "ver": ">=1.0"}, {"name": "bar", "ver": "1.0 - 2.0"}]}"#,
                "update.json",
            )
            .unwrap();

        let requirements = config.requirements(&default_constraint()).unwrap();
        let rendered: Vec<String> = requirements.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["foo(ver >=1.0)", "bar(ver >=1.0 <=2.0)"]);
    }

    #[test]
    fn test_missing_and_empty_ver_use_default() {
        let config: UpdateConfig = ConfigFormat::Yaml
            .parse("packages:\n  - name: foo\n  - name: bar\n    ver: \"\"\n", "update.yaml")
            .unwrap();

        let requirements = config.requirements(&default_constraint()).unwrap();
        assert_eq!(requirements.len(), 2);
        assert!(requirements.iter().all(|r| r.constraint == default_constraint()));
    }

    #[test]
    fn test_duplicate_requirement_rejected() {
        let config = UpdateConfig {
            packages: vec![
                RequirementSpec::new("foo", Some("1.0")),
                RequirementSpec::new("bar", Some("1.0")),
                RequirementSpec::new("foo", Some("=1.0")),
            ],
        };

        let error = config.requirements(&default_constraint()).unwrap_err();
        assert!(matches!(
            error,
            ParcelError::DuplicateRequirement { ref requirement } if requirement.name.as_str() == "foo"
        ));
    }

    #[test]
    fn test_default_collides_with_explicit_default() {
        let config = UpdateConfig {
            packages: vec![
                RequirementSpec::new("foo", None),
                RequirementSpec::new("foo", Some(">=0.1")),
            ],
        };

        assert!(matches!(
            config.requirements(&default_constraint()),
            Err(ParcelError::DuplicateRequirement { .. })
        ));
    }

    #[test]
    fn test_same_name_different_constraint_allowed() {
        let config = UpdateConfig {
            packages: vec![
                RequirementSpec::new("foo", Some(">=1.0")),
                RequirementSpec::new("foo", Some("<=2.0")),
            ],
        };

        assert_eq!(config.requirements(&default_constraint()).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_entries() {
        let bad_name = UpdateConfig {
            packages: vec![RequirementSpec::new("foo bar", Some("1.0"))],
        };
        assert!(matches!(
            bad_name.requirements(&default_constraint()),
            Err(ParcelError::Package(_))
        ));

        let bad_range = UpdateConfig {
            packages: vec![RequirementSpec::new("foo", Some(">1.3 <1.2"))],
        };
        assert!(matches!(
            bad_range.requirements(&default_constraint()),
            Err(ParcelError::Version(VersionError::InvalidConstraintRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_toml_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("update.toml")).unwrap();
        tokio::fs::write(
            &path,
            "[[packages]]\nname = \"foo\"\nver = \"<2.0\"\n\n[[packages]]\nname = \"bar\"\n",
        )
        .await
        .unwrap();

        let config = UpdateConfig::load(&path).await.unwrap();
        assert_eq!(config.packages[0], RequirementSpec::new("foo", Some("<2.0")));
        assert_eq!(config.packages[1], RequirementSpec::new("bar", None));
    }
}
