//! Statistics Output
//!
//! Collects run statistics while the population evolves.

use contagion_events::Checkpoint;
use std::collections::BTreeMap;

use crate::components::StepOutcome;
use crate::systems::RunObserver;

/// Accumulates statistics during a run
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    pub inheritances_by_feature: BTreeMap<usize, u64>,
    pub checkpoints: Vec<Checkpoint>,
    /// Request and keep every checkpoint
    keep_history: bool,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history() -> Self {
        Self {
            keep_history: true,
            ..Self::default()
        }
    }
}

impl RunObserver for StatsCollector {
    fn on_step(&mut self, _step: u64, outcome: &StepOutcome) {
        if let StepOutcome::Inherited { feature, .. } = outcome {
            *self.inheritances_by_feature.entry(*feature).or_insert(0) += 1;
        }
    }

    fn wants_checkpoints(&self) -> bool {
        self.keep_history
    }

    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        self.checkpoints.push(*checkpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Direction, Population, TraitSpace};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn checkpoint(step: u64, at_equilibrium: bool) -> Checkpoint {
        Checkpoint {
            step,
            prisonized_fraction: 0.5,
            active_agents: if at_equilibrium { 0 } else { 3 },
            at_equilibrium,
        }
    }

    #[test]
    fn test_counts_inheritances_by_feature() {
        let mut stats = StatsCollector::new();
        stats.on_step(1, &StepOutcome::Unchanged { neighbor: Direction::North });
        stats.on_step(2, &StepOutcome::Inherited { neighbor: Direction::East, feature: 0 });
        stats.on_step(3, &StepOutcome::Inherited { neighbor: Direction::West, feature: 2 });
        stats.on_step(4, &StepOutcome::Inherited { neighbor: Direction::South, feature: 0 });

        assert_eq!(stats.inheritances_by_feature.get(&0), Some(&2));
        assert_eq!(stats.inheritances_by_feature.get(&2), Some(&1));
        assert_eq!(stats.inheritances_by_feature.get(&1), None);
    }

    #[test]
    fn test_checkpoints_requested_only_with_history() {
        assert!(!StatsCollector::new().wants_checkpoints());
        assert!(StatsCollector::with_history().wants_checkpoints());
    }

    #[test]
    fn test_history_keeps_all_checkpoints() {
        let mut stats = StatsCollector::with_history();
        stats.on_checkpoint(&checkpoint(0, false));
        stats.on_checkpoint(&checkpoint(10, true));
        let steps: Vec<u64> = stats.checkpoints.iter().map(|c| c.step).collect();
        assert_eq!(steps, vec![0, 10]);
        assert!(stats.checkpoints[1].at_equilibrium);
    }

    #[test]
    fn test_history_run_records_every_check() {
        let mut rng = SmallRng::seed_from_u64(21);
        let space = TraitSpace::new(vec![2, 10, 10, 10, 10, 10, 10, 10, 10]).unwrap();
        let mut pop = Population::new(space, 20, &mut rng).unwrap();

        let mut plain = StatsCollector::new();
        pop.clone()
            .run_until_equilibrium_with(40, 10, &mut rng.clone(), &mut plain)
            .unwrap();
        assert!(plain.checkpoints.is_empty());

        let mut history = StatsCollector::with_history();
        pop.run_until_equilibrium_with(40, 10, &mut rng, &mut history)
            .unwrap();
        let steps: Vec<u64> = history.checkpoints.iter().map(|c| c.step).collect();
        assert_eq!(steps, vec![0, 10, 20, 30, 40]);
        assert_eq!(plain.inheritances_by_feature, history.inheritances_by_feature);
    }
}
