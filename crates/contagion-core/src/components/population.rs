//! Population
//!
//! A size x size toroidal grid with exactly one agent per cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::trait_space::TraitSpace;
use crate::error::{Result, SimError};

/// The four orthogonal neighbor directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// (row, col) offset of the neighbor in this direction
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Pick an axis uniformly, then a direction along it uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let vertical = rng.gen_bool(0.5);
        let forward = rng.gen_bool(0.5);
        match (vertical, forward) {
            (true, true) => Direction::South,
            (true, false) => Direction::North,
            (false, true) => Direction::East,
            (false, false) => Direction::West,
        }
    }
}

/// Outcome of a single agent update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent was not influenced, or had nothing left to inherit
    Unchanged { neighbor: Direction },
    /// The agent copied one feature from its neighbor
    Inherited { neighbor: Direction, feature: usize },
}

/// Grid of agents sharing one trait space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Population {
    space: TraitSpace,
    size: usize,
    /// Row-major, `size * size` agents
    agents: Vec<Agent>,
}

impl Population {
    /// Build a grid of freshly randomized, unprisonized agents
    pub fn new<R: Rng + ?Sized>(space: TraitSpace, size: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(SimError::InvalidGridSize(size));
        }
        let mut agents = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                agents.push(Agent::new(row, col, &space, rng));
            }
        }
        Ok(Self {
            space,
            size,
            agents,
        })
    }

    /// Build a grid where every agent holds the same traits
    pub fn uniform(space: TraitSpace, size: usize, traits: &[u32]) -> Result<Self> {
        if size == 0 {
            return Err(SimError::InvalidGridSize(size));
        }
        space.validate_traits(traits)?;
        let agents = (0..size * size)
            .map(|index| Agent::with_traits(index / size, index % size, traits.to_vec()))
            .collect();
        Ok(Self {
            space,
            size,
            agents,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (and agents)
    pub fn location_count(&self) -> usize {
        self.size * self.size
    }

    pub fn trait_space(&self) -> &TraitSpace {
        &self.space
    }

    /// Agents in row-major order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    fn wrap(&self, coord: i64) -> usize {
        coord.rem_euclid(self.size as i64) as usize
    }

    fn index(&self, row: i64, col: i64) -> usize {
        self.wrap(row) * self.size + self.wrap(col)
    }

    /// Agent at a position, wrapping coordinates in both directions
    pub fn neighbor_at(&self, row: i64, col: i64) -> &Agent {
        &self.agents[self.index(row, col)]
    }

    /// Agent at an in-grid position (wrapped if out of range)
    pub fn agent(&self, row: usize, col: usize) -> &Agent {
        self.neighbor_at(row as i64, col as i64)
    }

    pub fn agent_mut(&mut self, row: usize, col: usize) -> &mut Agent {
        let index = self.index(row as i64, col as i64);
        &mut self.agents[index]
    }

    fn neighbor_index(&self, row: usize, col: usize, direction: Direction) -> usize {
        let (dr, dc) = direction.offset();
        self.index(row as i64 + dr, col as i64 + dc)
    }

    /// The four orthogonal neighbors, in `Direction::ALL` order
    pub fn neighbors(&self, row: usize, col: usize) -> [&Agent; 4] {
        Direction::ALL.map(|direction| &self.agents[self.neighbor_index(row, col, direction)])
    }

    /// Update one agent: pick a random neighbor and maybe inherit a trait from it
    pub fn execute_step<R: Rng + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        rng: &mut R,
    ) -> StepOutcome {
        let neighbor = Direction::random(rng);
        let target = self.index(row as i64, col as i64);
        let source = self.neighbor_index(row, col, neighbor);

        let inheritance = {
            let agent = &self.agents[target];
            let other = &self.agents[source];
            if agent.is_influenced(other, rng) {
                agent.choose_inheritance(other, rng)
            } else {
                None
            }
        };

        match inheritance {
            Some((feature, value)) => {
                self.agents[target].set_trait(feature, value);
                StepOutcome::Inherited { neighbor, feature }
            }
            None => StepOutcome::Unchanged { neighbor },
        }
    }

    /// One unit of simulation time: update a uniformly chosen agent
    pub fn step_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        let row = rng.gen_range(0..self.size);
        let col = rng.gen_range(0..self.size);
        self.execute_step(row, col, rng)
    }

    pub fn prisonized_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_prisonized()).count()
    }

    pub fn prisonized_fraction(&self) -> f64 {
        self.prisonized_count() as f64 / self.location_count() as f64
    }

    /// Agents that could still be influenced by some neighbor
    pub fn active_agent_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.influence_possible(self))
            .count()
    }

    /// True when every agent fully agrees or fully disagrees with each neighbor
    pub fn is_at_equilibrium(&self) -> bool {
        !self.agents.iter().any(|a| a.influence_possible(self))
    }
}
