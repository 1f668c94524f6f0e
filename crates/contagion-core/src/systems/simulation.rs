//! Simulation
//!
//! One complete run: build the grid, seed prisonization, run to equilibrium,
//! and summarize.

use contagion_events::RunReport;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;

use super::run::RunOutcome;
use crate::components::Population;
use crate::config::{ConfigError, SimConfig};
use crate::error::Result;
use crate::output::{capture, StatsCollector};
use crate::setup::seed_prisonization;

/// What to include in the run report
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Attach the population before and after the run
    pub capture_states: bool,
    /// Attach every equilibrium checkpoint instead of only the final state
    pub keep_checkpoints: bool,
}

/// A configured population and its seeded random source
pub struct Simulation {
    config: SimConfig,
    population: Population,
    rng: SmallRng,
}

impl Simulation {
    /// Validate the configuration and build the initial, unseeded population
    pub fn from_config(config: SimConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let population = Population::new(config.trait_space()?, config.grid_size, &mut rng)?;
        Ok(Self {
            config,
            population,
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Seed, run until equilibrium or budget exhaustion, and report
    pub fn run(mut self, options: RunOptions) -> Result<RunReport> {
        let config = &self.config;
        let seeding = seed_prisonization(
            &mut self.population,
            config.initial_prisonized_fraction,
            config.seed_attempts_per_cell,
            &mut self.rng,
        )?;
        let starting_fraction = self.population.prisonized_fraction();
        info!(
            seeded = seeding.placed,
            attempts = seeding.attempts,
            "Starting prisonization: {}",
            starting_fraction
        );

        let initial_state = options
            .capture_states
            .then(|| capture(&self.population, 0));

        let mut stats = if options.keep_checkpoints {
            StatsCollector::with_history()
        } else {
            StatsCollector::new()
        };

        let started = Instant::now();
        let RunOutcome { steps, status } = self.population.run_until_equilibrium_with(
            config.max_steps,
            config.check_interval,
            &mut self.rng,
            &mut stats,
        )?;
        let elapsed_ms = started.elapsed().as_millis();

        let ending_fraction = self.population.prisonized_fraction();
        info!(
            steps,
            elapsed_ms = elapsed_ms as u64,
            "Ending prisonization: {}",
            ending_fraction
        );

        let mut checkpoints = stats.checkpoints;
        if checkpoints.last().map(|c| c.step) != Some(steps) {
            checkpoints.push(self.population.checkpoint(steps));
        }

        let final_state = options
            .capture_states
            .then(|| capture(&self.population, steps));

        Ok(RunReport {
            seed: config.seed,
            grid_size: config.grid_size,
            trait_counts: config.trait_counts.clone(),
            seeding,
            starting_prisonized_fraction: starting_fraction,
            ending_prisonized_fraction: ending_fraction,
            steps,
            status,
            elapsed_ms,
            inheritances_by_feature: stats.inheritances_by_feature,
            checkpoints,
            initial_state,
            final_state,
        })
    }
}
