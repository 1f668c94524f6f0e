//! Initial Prisonization
//!
//! Rejection-sampled seeding of the prisonized trait, with an attempt cap.

use contagion_events::SeedReport;
use rand::Rng;
use tracing::{debug, warn};

use crate::components::{Population, PRISONIZATION_FEATURE, PRISONIZED};
use crate::error::{Result, SimError};

/// Default cap on random cell draws, per grid cell
pub const DEFAULT_SEED_ATTEMPTS_PER_CELL: u64 = 64;

/// Draws beyond this many per cell are reported as slow seeding
const SLOW_SEEDING_ATTEMPTS_PER_CELL: u64 = 8;

/// Number of agents a fraction of the grid rounds to
pub fn seeding_target(fraction: f64, location_count: usize) -> Result<usize> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(SimError::InvalidFraction(fraction));
    }
    Ok((fraction * location_count as f64).round() as usize)
}

/// Prisonize `round(fraction * size^2)` currently unprisonized agents.
///
/// Cells are drawn uniformly with replacement; already-prisonized draws are
/// rejected and do not count. Gives up with `SeedingExhausted` once
/// `attempts_per_cell * size^2` draws have been made, leaving the agents
/// placed so far prisonized.
pub fn seed_prisonization<R: Rng + ?Sized>(
    population: &mut Population,
    fraction: f64,
    attempts_per_cell: u64,
    rng: &mut R,
) -> Result<SeedReport> {
    let cells = population.location_count();
    let target = seeding_target(fraction, cells)?;

    let available = cells - population.prisonized_count();
    if target > available {
        return Err(SimError::SeedingExhausted {
            target,
            placed: 0,
            attempts: 0,
        });
    }

    let max_attempts = attempts_per_cell.saturating_mul(cells as u64);
    let size = population.size();
    let mut remaining = target;
    let mut attempts = 0u64;

    while remaining > 0 {
        if attempts >= max_attempts {
            return Err(SimError::SeedingExhausted {
                target,
                placed: target - remaining,
                attempts,
            });
        }
        attempts += 1;

        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        let agent = population.agent_mut(row, col);
        if !agent.is_prisonized() {
            agent.set_trait(PRISONIZATION_FEATURE, PRISONIZED);
            remaining -= 1;
        }
    }

    if attempts > SLOW_SEEDING_ATTEMPTS_PER_CELL * cells as u64 {
        warn!(
            attempts,
            cells, "Seeding needed many draws; fraction {} is close to saturation", fraction
        );
    }
    debug!(seeded = target, attempts, "Seeded initial prisonization");

    Ok(SeedReport {
        target,
        placed: target,
        attempts,
    })
}

impl Population {
    /// Seed the initial prisonized agents with the default attempt cap
    pub fn seed_prisonization<R: Rng + ?Sized>(
        &mut self,
        fraction: f64,
        rng: &mut R,
    ) -> Result<SeedReport> {
        seed_prisonization(self, fraction, DEFAULT_SEED_ATTEMPTS_PER_CELL, rng)
    }
}
