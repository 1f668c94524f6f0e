//! Snapshot Types
//!
//! Serialization structs for population snapshots.
//!
//! A snapshot captures every agent's cultural state at a point in the run,
//! used for reporting and debugging.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID with the given step number.
pub fn generate_snapshot_id(step: u64) -> String {
    format!("snap_{:010}", step)
}

/// One grid cell's cultural state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub row: usize,
    pub col: usize,
    pub traits: Vec<u32>,
    pub prisonized: bool,
}

impl AgentSnapshot {
    pub fn new(row: usize, col: usize, traits: Vec<u32>) -> Self {
        let prisonized = traits.first() == Some(&1);
        Self {
            row,
            col,
            traits,
            prisonized,
        }
    }
}

/// Complete population state at a given step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub step: u64,
    pub grid_size: usize,
    pub trait_counts: Vec<u32>,
    pub prisonized_fraction: f64,
    /// Agents in row-major order
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    pub fn new(step: u64, grid_size: usize, trait_counts: Vec<u32>) -> Self {
        Self {
            snapshot_id: generate_snapshot_id(step),
            step,
            grid_size,
            trait_counts,
            prisonized_fraction: 0.0,
            agents: Vec::new(),
        }
    }

    /// Get the agent at a grid position, if present
    pub fn agent(&self, row: usize, col: usize) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.row == row && a.col == col)
    }

    pub fn prisonized_count(&self) -> usize {
        self.agents.iter().filter(|a| a.prisonized).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_snapshot_id() {
        assert_eq!(generate_snapshot_id(0), "snap_0000000000");
        assert_eq!(generate_snapshot_id(1234), "snap_0000001234");
    }

    #[test]
    fn test_agent_snapshot_prisonized_flag() {
        assert!(AgentSnapshot::new(0, 0, vec![1, 2, 0]).prisonized);
        assert!(!AgentSnapshot::new(0, 1, vec![0, 2, 0]).prisonized);
    }

    #[test]
    fn test_population_snapshot_lookup() {
        let mut snapshot = PopulationSnapshot::new(10, 2, vec![2, 3]);
        snapshot.agents.push(AgentSnapshot::new(0, 0, vec![1, 2]));
        snapshot.agents.push(AgentSnapshot::new(1, 1, vec![0, 1]));

        assert_eq!(snapshot.snapshot_id, "snap_0000000010");
        assert_eq!(snapshot.agent(1, 1).map(|a| a.traits.clone()), Some(vec![0, 1]));
        assert!(snapshot.agent(0, 1).is_none());
        assert_eq!(snapshot.prisonized_count(), 1);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut snapshot = PopulationSnapshot::new(0, 1, vec![2]);
        snapshot.agents.push(AgentSnapshot::new(0, 0, vec![0]));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["grid_size"], 1);
        assert_eq!(json["agents"][0]["prisonized"], false);
    }
}
