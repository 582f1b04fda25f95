//! Best-match tracking for requirement resolution
//!
//! Keeps, for every requirement slot, the highest-versioned inventory entry
//! offered so far. A later candidate replaces the current best only when its
//! version is strictly greater, so among equal versions the first one offered
//! stays selected.

use crate::inventory::InventoryEntry;

/// Per-requirement best candidate, indexed by requirement position
#[derive(Debug, Clone)]
pub struct BestMatches<'a> {
    slots: Vec<Option<&'a InventoryEntry>>,
}

impl<'a> BestMatches<'a> {
    /// Create a tracker for `len` requirements with nothing selected
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Offer a matching candidate for requirement `index`.
    ///
    /// Returns `true` if the candidate became the new best.
    pub fn offer(&mut self, index: usize, candidate: &'a InventoryEntry) -> bool {
        let slot = &mut self.slots[index];
        match *slot {
            Some(best) if candidate.id.version <= best.id.version => false,
            _ => {
                *slot = Some(candidate);
                true
            },
        }
    }

    /// Best candidate for requirement `index`
    pub fn get(&self, index: usize) -> Option<&'a InventoryEntry> {
        self.slots[index]
    }

    /// Iterate slots in requirement order
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a InventoryEntry>> + '_ {
        self.slots.iter().copied()
    }

    /// Check if every requirement has a candidate
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
