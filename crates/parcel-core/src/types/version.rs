//! Two-component package versions.
//!
//! A `Version` is a `major.minor` pair of non-negative integers. `0.0` is not
//! a valid version. Parsing normalizes leading zeros, so `001.0001` reads as `1.1`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Package version (major.minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
}

/// Version and constraint parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {input:?}")]
    InvalidVersionFormat { input: String },

    #[error("Invalid version constraint: {input:?}")]
    InvalidConstraintSyntax { input: String },

    #[error("Invalid version range {input:?}: lower bound {lower} is greater than upper bound {upper}")]
    InvalidConstraintRange {
        input: String,
        lower: Version,
        upper: Version,
    },
}

impl Version {
    /// Create a new version, rejecting `0.0`
    pub fn new(major: u64, minor: u64) -> Result<Self, VersionError> {
        if major == 0 && minor == 0 {
            return Err(VersionError::InvalidVersionFormat {
                input: format!("{}.{}", major, minor),
            });
        }
        Ok(Self { major, minor })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }
}

/// Parse one version component: ASCII digits only, no sign, no whitespace
fn parse_component(component: &str) -> Option<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersionFormat {
            input: s.to_string(),
        };

        // Split on the first '.'; a second '.' lands in the minor part and fails there
        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        let major = parse_component(major).ok_or_else(invalid)?;
        let minor = parse_component(minor).ok_or_else(invalid)?;

        Version::new(major, minor).map_err(|_| invalid())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("1.2").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
    }

    #[test]
    fn test_version_normalizes_leading_zeros() {
        let v = Version::from_str("001.0001").unwrap();
        assert_eq!(v, Version::new(1, 1).unwrap());
        assert_eq!(v.to_string(), "1.1");
    }

    #[test]
    fn test_zero_components_allowed_separately() {
        assert_eq!(Version::from_str("0.1").unwrap().to_string(), "0.1");
        assert_eq!(Version::from_str("3.0").unwrap().to_string(), "3.0");
    }

    #[test]
    fn test_invalid_versions() {
        for input in [
            "0.0", "1", "-1", "abcde", " 1 . 2 ", "1.2.3", "1.", ".1", "+1.2", "1.-2", "",
            "1.2 ", "18446744073709551616.1",
        ] {
            let err = Version::from_str(input).unwrap_err();
            assert_eq!(
                err,
                VersionError::InvalidVersionFormat {
                    input: input.to_string()
                },
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_new_rejects_zero_zero() {
        assert!(Version::new(0, 0).is_err());
        assert!(Version::new(0, 1).is_ok());
    }

    #[test]
    fn test_version_comparison() {
        let v1_0 = Version::new(1, 0).unwrap();
        let v1_9 = Version::new(1, 9).unwrap();
        let v1_10 = Version::new(1, 10).unwrap();
        let v2_0 = Version::new(2, 0).unwrap();

        assert!(v1_0 < v1_9);
        assert!(v1_9 < v1_10);
        assert!(v1_10 < v2_0);
        assert_eq!(v1_0.cmp(&Version::new(1, 0).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_serde_as_string() {
        let v: Version = serde_json::from_str("\"2.5\"").unwrap();
        assert_eq!(v, Version::new(2, 5).unwrap());
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"2.5\"");
        assert!(serde_json::from_str::<Version>("\"0.0\"").is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn version_round_trip(major in 0u64..10_000, minor in 0u64..10_000) {
            prop_assume!(major != 0 || minor != 0);

            let original = Version::new(major, minor).unwrap();
            let parsed = Version::from_str(&original.to_string()).unwrap();
            prop_assert_eq!(parsed, original);
        }

        #[test]
        fn zero_padding_is_normalized(major in 1u64..1000, minor in 0u64..1000, pad in 0usize..4) {
            let padded = format!("{}{}.{}{}", "0".repeat(pad), major, "0".repeat(pad), minor);
            let parsed = Version::from_str(&padded).unwrap();
            prop_assert_eq!(parsed.to_string(), format!("{}.{}", major, minor));
        }

        #[test]
        fn ordering_is_lexicographic(
            a in (0u64..50, 0u64..50),
            b in (0u64..50, 0u64..50),
        ) {
            prop_assume!(a != (0, 0) && b != (0, 0));

            let va = Version::new(a.0, a.1).unwrap();
            let vb = Version::new(b.0, b.1).unwrap();
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }
    }
}
