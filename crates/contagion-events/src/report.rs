//! Run Report Types
//!
//! Aggregate statistics a driver reads out of a simulation run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::PopulationSnapshot;

/// How a run terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumStatus {
    /// No agent can be influenced by any neighbor anymore
    Converged,
    /// The step budget ran out before the grid settled
    BudgetExhausted,
}

impl EquilibriumStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, EquilibriumStatus::Converged)
    }
}

/// Result of applying the initial prisonization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Number of agents the seeding fraction asked for
    pub target: usize,
    /// Number of agents newly prisonized
    pub placed: usize,
    /// Random cells drawn, including rejected ones
    pub attempts: u64,
}

/// Aggregate state observed at an equilibrium check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub step: u64,
    pub prisonized_fraction: f64,
    /// Agents that still have a partially similar neighbor
    pub active_agents: usize,
    pub at_equilibrium: bool,
}

/// Summary of a full run, from seeding to termination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub seed: u64,
    pub grid_size: usize,
    pub trait_counts: Vec<u32>,
    pub seeding: SeedReport,
    pub starting_prisonized_fraction: f64,
    pub ending_prisonized_fraction: f64,
    pub steps: u64,
    pub status: EquilibriumStatus,
    pub elapsed_ms: u128,
    /// Trait inheritances per feature index
    #[serde(default)]
    pub inheritances_by_feature: BTreeMap<usize, u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<PopulationSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<PopulationSnapshot>,
}

impl RunReport {
    pub fn total_inheritances(&self) -> u64 {
        self.inheritances_by_feature.values().sum()
    }

    /// Change in prisonized fraction over the run (positive = spread)
    pub fn prisonization_delta(&self) -> f64 {
        self.ending_prisonized_fraction - self.starting_prisonized_fraction
    }
}
