//! Run Loop
//!
//! Repeated random agent updates with periodic equilibrium checks.

use contagion_events::{Checkpoint, EquilibriumStatus};
use rand::Rng;
use tracing::{debug, info};

use crate::components::{Population, StepOutcome};
use crate::error::{Result, SimError};

/// Receives progress from `run_until_equilibrium_with`
pub trait RunObserver {
    /// Called after every agent update, with the 1-based step number
    fn on_step(&mut self, _step: u64, _outcome: &StepOutcome) {}

    /// Whether `on_checkpoint` should be called. Building a checkpoint scans
    /// the whole grid, so observers that ignore them keep the default.
    fn wants_checkpoints(&self) -> bool {
        false
    }

    /// Called at every equilibrium check, including the one before the first step
    fn on_checkpoint(&mut self, _checkpoint: &Checkpoint) {}
}

impl RunObserver for () {}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub steps: u64,
    pub status: EquilibriumStatus,
}

impl RunOutcome {
    pub fn converged(&self) -> bool {
        self.status.is_converged()
    }
}

impl Population {
    /// Aggregate statistics for the current grid state
    pub fn checkpoint(&self, step: u64) -> Checkpoint {
        let active_agents = self.active_agent_count();
        Checkpoint {
            step,
            prisonized_fraction: self.prisonized_fraction(),
            active_agents,
            at_equilibrium: active_agents == 0,
        }
    }

    /// Step random agents until equilibrium or until `max_steps` updates.
    ///
    /// Running out of budget is reported through `EquilibriumStatus`, not as an
    /// error. Only a zero `check_interval` fails.
    pub fn run_until_equilibrium<R: Rng + ?Sized>(
        &mut self,
        max_steps: u64,
        check_interval: u64,
        rng: &mut R,
    ) -> Result<RunOutcome> {
        self.run_until_equilibrium_with(max_steps, check_interval, rng, &mut ())
    }

    /// Same as `run_until_equilibrium`, reporting steps and checkpoints to `observer`
    pub fn run_until_equilibrium_with<R, O>(
        &mut self,
        max_steps: u64,
        check_interval: u64,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<RunOutcome>
    where
        R: Rng + ?Sized,
        O: RunObserver + ?Sized,
    {
        if check_interval == 0 {
            return Err(SimError::InvalidCheckInterval(check_interval));
        }

        let mut steps = 0u64;
        if self.check(steps, observer) {
            return Ok(self.finish(steps, EquilibriumStatus::Converged));
        }

        while steps < max_steps {
            let outcome = self.step_random(rng);
            steps += 1;
            observer.on_step(steps, &outcome);

            if steps % check_interval == 0 && self.check(steps, observer) {
                return Ok(self.finish(steps, EquilibriumStatus::Converged));
            }
        }

        // The budget may end between scheduled checks
        let status = if steps % check_interval != 0 && self.check(steps, observer) {
            EquilibriumStatus::Converged
        } else {
            EquilibriumStatus::BudgetExhausted
        };
        Ok(self.finish(steps, status))
    }

    fn check<O: RunObserver + ?Sized>(&self, step: u64, observer: &mut O) -> bool {
        if !observer.wants_checkpoints() {
            let settled = self.is_at_equilibrium();
            debug!(step, settled, "Equilibrium check");
            return settled;
        }

        let checkpoint = self.checkpoint(step);
        debug!(
            step,
            active_agents = checkpoint.active_agents,
            prisonized = checkpoint.prisonized_fraction,
            "Equilibrium check"
        );
        observer.on_checkpoint(&checkpoint);
        checkpoint.at_equilibrium
    }

    fn finish(&self, steps: u64, status: EquilibriumStatus) -> RunOutcome {
        match status {
            EquilibriumStatus::Converged => info!(steps, "Population reached equilibrium"),
            EquilibriumStatus::BudgetExhausted => {
                info!(steps, "Step budget exhausted before equilibrium")
            }
        }
        RunOutcome { steps, status }
    }
}
