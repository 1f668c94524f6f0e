//! End-to-end scenarios driving the model the way an external driver would.

use contagion_core::{
    EquilibriumStatus, Population, RunOutcome, SimConfig, SimError, Simulation, TraitSpace,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

fn four_by_four(seed: u64) -> (Population, SmallRng) {
    let space = TraitSpace::new(vec![2, 3, 3, 3]).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let population = Population::new(space, 4, &mut rng).unwrap();
    (population, rng)
}

fn run_scenario(seed: u64) -> (RunOutcome, f64, Vec<Vec<u32>>) {
    let (mut population, mut rng) = four_by_four(seed);
    let seeding = population.seed_prisonization(0.25, &mut rng).unwrap();
    assert_eq!(seeding.placed, 4);
    assert_eq!(population.prisonized_count(), 4);
    assert_eq!(population.prisonized_fraction(), 0.25);

    let outcome = population.run_until_equilibrium(1000, 10, &mut rng).unwrap();
    let traits = population.agents().map(|a| a.traits().to_vec()).collect();
    (outcome, population.prisonized_fraction(), traits)
}

#[test]
fn test_four_by_four_scenario_reproducible() {
    let (outcome_a, fraction_a, traits_a) = run_scenario(2024);
    let (outcome_b, fraction_b, traits_b) = run_scenario(2024);

    assert_eq!(outcome_a, outcome_b);
    assert_eq!(fraction_a, fraction_b);
    assert_eq!(traits_a, traits_b);

    assert!(outcome_a.steps <= 1000);
    match outcome_a.status {
        EquilibriumStatus::Converged => assert!(outcome_a.steps % 10 == 0),
        EquilibriumStatus::BudgetExhausted => assert_eq!(outcome_a.steps, 1000),
    }
}

#[test]
fn test_converged_run_leaves_settled_grid() {
    let (mut population, mut rng) = four_by_four(7);
    population.seed_prisonization(0.25, &mut rng).unwrap();
    let outcome = population
        .run_until_equilibrium(5_000_000, 10, &mut rng)
        .unwrap();

    assert_eq!(outcome.converged(), population.is_at_equilibrium());
    if outcome.converged() {
        assert_eq!(population.active_agent_count(), 0);
    }
}

#[test]
fn test_uniform_fixture_is_immediately_at_equilibrium() {
    let space = TraitSpace::new(vec![2, 3, 3, 3]).unwrap();
    let population = Population::uniform(space, 5, &[0, 2, 1, 0]).unwrap();
    assert!(population.is_at_equilibrium());
}

#[test]
fn test_driver_flow_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "trait_counts = [2, 4, 4]\ngrid_size = 5\ninitial_prisonized_fraction = 0.4\nmax_steps = 2000\ncheck_interval = 25\nseed = 11"
    )
    .unwrap();

    let config = SimConfig::from_file(file.path()).unwrap();
    assert_eq!(config.trait_counts, vec![2, 4, 4]);

    let report = Simulation::from_config(config)
        .unwrap()
        .run(Default::default())
        .unwrap();
    assert_eq!(report.seeding.placed, 10);
    assert_eq!(report.starting_prisonized_fraction, 0.4);
    assert!(report.steps <= 2000);
    assert!((0.0..=1.0).contains(&report.ending_prisonized_fraction));
}

#[test]
fn test_invalid_schema_fails_fast() {
    assert!(matches!(
        TraitSpace::new(vec![3, 3, 3]),
        Err(SimError::InvalidTraitSpace(_))
    ));
    assert!(matches!(
        TraitSpace::new(Vec::new()),
        Err(SimError::InvalidTraitSpace(_))
    ));
}
