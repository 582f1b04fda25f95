//! Requirement resolution against an inventory snapshot
//!
//! Every requirement is matched against every inventory entry; the highest
//! matching version wins, with earlier entries kept on ties. Resolution
//! either satisfies every requirement or reports all unsatisfied ones at once.

use parcel_core::error::ParcelError;
use parcel_core::types::Requirement;
use thiserror::Error;
use tracing::{debug, info};

use crate::inventory::Inventory;
use crate::plan::FetchPlan;
use crate::select::BestMatches;
use crate::ResolverResult;

/// Stateless requirement resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

/// Requirements that no inventory entry satisfies, in input order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} requirement(s) could not be satisfied", .unsatisfied.len())]
pub struct ResolutionError {
    pub unsatisfied: Vec<Requirement>,
}

impl From<ResolutionError> for ParcelError {
    fn from(error: ResolutionError) -> Self {
        ParcelError::ResolutionFailed {
            unsatisfied: error.unsatisfied,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `requirements` against `inventory`.
    ///
    /// Requirements are expected to be free of duplicates; configuration
    /// loading rejects them before resolution runs.
    pub fn resolve(
        &self,
        requirements: &[Requirement],
        inventory: &Inventory,
    ) -> Result<FetchPlan, ResolutionError> {
        let best = self.select(requirements, inventory);

        if !best.is_complete() {
            let unsatisfied = requirements
                .iter()
                .zip(best.iter())
                .filter(|(_, selected)| selected.is_none())
                .map(|(req, _)| req.clone())
                .collect();
            return Err(ResolutionError { unsatisfied });
        }

        let mut plan = FetchPlan::new();
        for (index, req) in requirements.iter().enumerate() {
            if let Some(entry) = best.get(index) {
                plan.insert(&entry.id, &entry.file_name, req.clone());
            }
        }

        for entry in plan.shared() {
            let names: Vec<String> = entry.requirements.iter().map(|r| r.to_string()).collect();
            info!(
                "Package {} satisfies several requirements: {}",
                entry.package,
                names.join(", ")
            );
        }

        Ok(plan)
    }

    /// Resolve raw store entry names, mapping failures into `ParcelError`
    pub fn resolve_names<I, S>(&self, requirements: &[Requirement], names: I) -> ResolverResult<FetchPlan>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let inventory = Inventory::from_names(names);
        Ok(self.resolve(requirements, &inventory)?)
    }

    fn select<'a>(&self, requirements: &[Requirement], inventory: &'a Inventory) -> BestMatches<'a> {
        let mut best = BestMatches::new(requirements.len());

        for entry in inventory.entries() {
            for (index, req) in requirements.iter().enumerate() {
                if req.matches(&entry.id) && best.offer(index, entry) {
                    debug!("Selected {} for {}", entry.id, req);
                }
            }
        }

        best
    }
}
