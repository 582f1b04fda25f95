//! Requirement resolution engine for Parcel
//!
//! This crate matches a flat list of package requirements against a snapshot
//! of the package store and produces either an ordered, deduplicated fetch
//! plan or the complete list of requirements that cannot be satisfied.
//!
//! Resolution is a pure, synchronous computation: the inventory is handed in
//! already materialized and nothing is cached between calls.

pub mod inventory;
pub mod plan;
pub mod resolve;
pub mod select;

// Re-export main types
pub use inventory::{Inventory, InventoryEntry};
pub use plan::{FetchPlan, PlanEntry};
pub use resolve::{ResolutionError, Resolver};
pub use select::BestMatches;

use parcel_core::error::ParcelError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ParcelError>;
