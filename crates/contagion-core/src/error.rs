//! Simulation Errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid trait space: {0}")]
    InvalidTraitSpace(String),

    #[error("Invalid grid size: {0} (must be at least 1)")]
    InvalidGridSize(usize),

    #[error("Invalid prisonization fraction: {0} (must be within 0.0..=1.0)")]
    InvalidFraction(f64),

    #[error("Invalid equilibrium check interval: {0} (must be at least 1)")]
    InvalidCheckInterval(u64),

    #[error("Invalid traits: {0}")]
    InvalidTraits(String),

    #[error("Seeding exhausted after {attempts} attempts: placed {placed} of {target}")]
    SeedingExhausted {
        target: usize,
        placed: usize,
        attempts: u64,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
