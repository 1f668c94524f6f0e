//! Configuration loading for a simulation run.
//!
//! Every run parameter can be loaded from a TOML file; missing keys fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::components::TraitSpace;
use crate::error::SimError;
use crate::setup::{seeding_target, DEFAULT_SEED_ATTEMPTS_PER_CELL};

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of traits per feature; feature 0 must be binary
    pub trait_counts: Vec<u32>,
    /// Height and width of the toroidal grid
    pub grid_size: usize,
    /// Fraction of agents prisonized before the run
    pub initial_prisonized_fraction: f64,
    /// Maximum number of agent updates
    pub max_steps: u64,
    /// Agent updates between equilibrium checks
    pub check_interval: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Seeding gives up after this many random draws per grid cell
    pub seed_attempts_per_cell: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trait_counts: vec![2, 3, 3, 3],
            grid_size: 10,
            initial_prisonized_fraction: 0.2,
            max_steps: 1_000_000,
            check_interval: 10,
            seed: 42,
            seed_attempts_per_cell: DEFAULT_SEED_ATTEMPTS_PER_CELL,
        }
    }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the trait space this configuration describes.
    pub fn trait_space(&self) -> Result<TraitSpace, SimError> {
        TraitSpace::new(self.trait_counts.clone())
    }

    /// Checks every parameter before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trait_space()?;
        if self.grid_size == 0 {
            return Err(SimError::InvalidGridSize(self.grid_size).into());
        }
        if self.check_interval == 0 {
            return Err(SimError::InvalidCheckInterval(self.check_interval).into());
        }
        seeding_target(
            self.initial_prisonized_fraction,
            self.grid_size * self.grid_size,
        )?;
        Ok(())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SimError),
}
