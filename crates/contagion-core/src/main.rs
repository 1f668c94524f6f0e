//! Prisonization Contagion Simulator
//!
//! Seeds a fraction of a toroidal population as prisonized, lets cultural
//! traits diffuse between neighbors, and reports how far prisonization spread.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use contagion_core::{RunOptions, RunReport, SimConfig, Simulation};
use contagion_events::PopulationSnapshot;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparseable
const DEFAULT_LOG_FILTER: &str = "info";

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "prisonization")]
#[command(about = "Prisonization contagion simulator")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Height and width of the grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Initial prisonized fraction (0.0 - 1.0)
    #[arg(long)]
    fraction: Option<f64>,

    /// Maximum number of agent updates
    #[arg(long)]
    max_steps: Option<u64>,

    /// Agent updates between equilibrium checks
    #[arg(long)]
    check_interval: Option<u64>,

    /// Trait counts per feature, e.g. 2,3,3,3
    #[arg(long, value_delimiter = ',')]
    traits: Option<Vec<u32>>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Include every agent's traits before and after the run
    #[arg(long)]
    dump_agents: bool,

    /// Keep every equilibrium checkpoint in the report
    #[arg(long)]
    history: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn effective_config(&self) -> Result<SimConfig, contagion_core::ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(fraction) = self.fraction {
            config.initial_prisonized_fraction = fraction;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(check_interval) = self.check_interval {
            config.check_interval = check_interval;
        }
        if let Some(traits) = &self.traits {
            config.trait_counts = traits.clone();
        }
        Ok(config)
    }
}

/// Directives from the environment as given, falling back to `info`
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.effective_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Could not load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Could not serialize configuration: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let simulation = match Simulation::from_config(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        grid_size = simulation.population().size(),
        seed = simulation.config().seed,
        "Population created"
    );

    let report = match simulation.run(RunOptions {
        capture_states: args.dump_agents,
        keep_checkpoints: args.history,
    }) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Could not serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    ExitCode::SUCCESS
}

fn print_report(report: &RunReport) {
    println!("Prisonization Contagion");
    println!("=======================");
    println!("Seed: {}", report.seed);
    println!("Grid: {0}x{0}", report.grid_size);
    println!("Trait counts: {:?}", report.trait_counts);
    println!(
        "Seeding: {} agents in {} draws",
        report.seeding.placed, report.seeding.attempts
    );
    println!();

    if let Some(initial) = &report.initial_state {
        print_agents("Starting state", initial);
    }

    println!(
        "Starting prisonization: {:.4}",
        report.starting_prisonized_fraction
    );
    if report.status.is_converged() {
        println!("Reached equilibrium after {} steps", report.steps);
    } else {
        println!("Did not converge within {} steps", report.steps);
    }
    println!("Completion time: {} ms", report.elapsed_ms);
    println!("Trait inheritances: {}", report.total_inheritances());
    for (feature, count) in &report.inheritances_by_feature {
        println!("  feature {}: {}", feature, count);
    }
    println!(
        "Ending prisonization: {:.4} ({:+.4})",
        report.ending_prisonized_fraction,
        report.prisonization_delta()
    );

    if report.checkpoints.len() > 1 {
        println!();
        println!("Checkpoints:");
        for checkpoint in &report.checkpoints {
            println!(
                "  step {:>10}  prisonized {:.4}  active {}",
                checkpoint.step, checkpoint.prisonized_fraction, checkpoint.active_agents
            );
        }
    }

    if let Some(last) = &report.final_state {
        println!();
        print_agents("Ending state", last);
    }
}

fn print_agents(title: &str, snapshot: &PopulationSnapshot) {
    println!("{} (step {}):", title, snapshot.step);
    for agent in &snapshot.agents {
        println!("  ({}, {}) {:?}", agent.row, agent.col, agent.traits);
    }
}
