//! Fetch plans: the deduplicated, ordered output of a resolution.

use indexmap::IndexMap;
use parcel_core::types::{PackageId, Requirement};

/// One artifact to fetch, with every requirement it satisfies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub package: PackageId,
    /// Store entry name the package was selected from
    pub file_name: String,
    /// Satisfied requirements, in input order
    pub requirements: Vec<Requirement>,
}

/// Ordered set of artifacts keyed by package identifier.
///
/// Insertion order is the order in which the first requirement resolving to
/// each identifier appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    entries: IndexMap<PackageId, PlanEntry>,
}

impl PlanEntry {
    /// Check if more than one requirement resolved to this artifact
    pub fn is_shared(&self) -> bool {
        self.requirements.len() > 1
    }
}

impl FetchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `requirement` resolved to `package` (listed as `file_name`).
    ///
    /// The first insertion for a package fixes its position and file name.
    pub fn insert(&mut self, package: &PackageId, file_name: &str, requirement: Requirement) {
        self.entries
            .entry(package.clone())
            .or_insert_with(|| PlanEntry {
                package: package.clone(),
                file_name: file_name.to_string(),
                requirements: Vec::new(),
            })
            .requirements
            .push(requirement);
    }

    /// Plan entries in fetch order
    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.values()
    }

    /// Canonical `<name>-<major>.<minor>` identifiers in fetch order
    pub fn identifiers(&self) -> Vec<String> {
        self.entries.keys().map(|id| id.to_string()).collect()
    }

    /// Entries satisfying more than one requirement
    pub fn shared(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.values().filter(|entry| entry.is_shared())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FetchPlan {
    type Item = &'a PlanEntry;
    type IntoIter = indexmap::map::Values<'a, PackageId, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PackageId {
        s.parse().unwrap()
    }

    fn req(name: &str, constraint: &str) -> Requirement {
        Requirement::parse(name, constraint).unwrap()
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut plan = FetchPlan::new();
        plan.insert(&id("zed-1.0"), "zed-1.0.tar.gz", req("zed", "1.0"));
        plan.insert(&id("alpha-2.0"), "alpha-2.0.tar.gz", req("alpha", ">=1.0"));

        assert_eq!(plan.identifiers(), vec!["zed-1.0", "alpha-2.0"]);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_repeated_package_is_merged() {
        let mut plan = FetchPlan::new();
        plan.insert(&id("foo-2.0"), "foo-2.0.tar.gz", req("foo", ">=1.0"));
        plan.insert(&id("bar-1.0"), "bar-1.0", req("bar", "1.0"));
        plan.insert(&id("foo-2.0"), "foo-2.0", req("foo", "<=2.0"));

        assert_eq!(plan.identifiers(), vec!["foo-2.0", "bar-1.0"]);

        let foo = plan.entries().find(|entry| entry.package == id("foo-2.0")).unwrap();
        assert_eq!(foo.file_name, "foo-2.0.tar.gz");
        assert_eq!(foo.requirements, vec![req("foo", ">=1.0"), req("foo", "<=2.0")]);

        let shared: Vec<&PlanEntry> = plan.shared().collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].package, id("foo-2.0"));
    }

    #[test]
    fn test_empty_plan() {
        let plan = FetchPlan::new();
        assert!(plan.is_empty());
        assert!(plan.identifiers().is_empty());
        assert_eq!(plan.shared().count(), 0);
    }
}
