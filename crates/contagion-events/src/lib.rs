//! Shared report types for the prisonization contagion simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The simulation core produces them; drivers print or serialize them.

pub mod report;
pub mod snapshot;

// Re-export report types
pub use report::{Checkpoint, EquilibriumStatus, RunReport, SeedReport};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentSnapshot, PopulationSnapshot};
