//! Snapshot Generation
//!
//! Converts a live population into its serializable snapshot.

use contagion_events::{AgentSnapshot, PopulationSnapshot};

use crate::components::Population;

/// Capture every agent's traits at the given step
pub fn capture(population: &Population, step: u64) -> PopulationSnapshot {
    let mut snapshot = PopulationSnapshot::new(
        step,
        population.size(),
        population.trait_space().trait_counts().to_vec(),
    );
    snapshot.prisonized_fraction = population.prisonized_fraction();
    snapshot.agents = population
        .agents()
        .map(|agent| AgentSnapshot::new(agent.row(), agent.col(), agent.traits().to_vec()))
        .collect();
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TraitSpace;

    #[test]
    fn test_capture_lists_agents_row_major() {
        let space = TraitSpace::new(vec![2, 4]).unwrap();
        let mut pop = Population::uniform(space, 2, &[0, 3]).unwrap();
        pop.agent_mut(1, 0).set_trait(0, 1);

        let snapshot = capture(&pop, 12);
        assert_eq!(snapshot.step, 12);
        assert_eq!(snapshot.grid_size, 2);
        assert_eq!(snapshot.trait_counts, vec![2, 4]);
        assert_eq!(snapshot.prisonized_fraction, 0.25);

        let positions: Vec<(usize, usize)> = snapshot.agents.iter().map(|a| (a.row, a.col)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(snapshot.agent(1, 0).unwrap().prisonized);
        assert_eq!(snapshot.prisonized_count(), 1);
    }
}
