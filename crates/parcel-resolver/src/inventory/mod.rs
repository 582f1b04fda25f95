//! Point-in-time snapshot of the packages available in the store.
//!
//! Store listings can contain files that are not package archives; entries
//! that do not parse as a package identifier are dropped here, silently as
//! far as the caller is concerned.

use parcel_core::types::PackageId;
use tracing::debug;

/// One valid package found in the store listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Parsed identifier
    pub id: PackageId,
    /// Name of the entry as listed by the store (what gets fetched)
    pub file_name: String,
}

/// Snapshot of valid package entries, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl InventoryEntry {
    /// Parse a listed file name, `None` if it is not a package archive
    pub fn parse(file_name: &str) -> Option<Self> {
        match PackageId::from_file_name(file_name) {
            Ok(id) => Some(Self {
                id,
                file_name: file_name.to_string(),
            }),
            Err(e) => {
                debug!("Skipping store entry {:?}: {}", file_name, e);
                None
            },
        }
    }
}

impl Inventory {
    /// Build an inventory from raw store entry names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .filter_map(|name| InventoryEntry::parse(name.as_ref()))
            .collect();
        Self { entries }
    }

    /// Valid entries in listing order
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers sorted by name then version
    pub fn sorted_ids(&self) -> Vec<&PackageId> {
        let mut ids: Vec<&PackageId> = self.entries.iter().map(|entry| &entry.id).collect();
        ids.sort();
        ids
    }
}
