//! Prisonization Contagion Simulation Library
//!
//! Agents on a toroidal grid carry categorical cultural traits and copy traits
//! from neighbors they partially resemble. Feature 0 marks an agent as
//! prisonized; the run tracks how that marker spreads until the grid settles.

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, SimConfig};
pub use error::{Result, SimError};
pub use setup::seed_prisonization;
pub use systems::{RunObserver, RunOptions, RunOutcome, Simulation};

pub use contagion_events::{Checkpoint, EquilibriumStatus, RunReport, SeedReport};
