//! Agent
//!
//! One grid cell's cultural state: a trait value per feature.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::population::Population;
use super::trait_space::{TraitSpace, NOT_PRISONIZED, PRISONIZATION_FEATURE, PRISONIZED};

/// True when two agents share some but not all traits
pub fn partially_similar(similarity: f64) -> bool {
    similarity > 0.0 && similarity < 1.0
}

/// A single agent living at a fixed grid position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    row: usize,
    col: usize,
    traits: Vec<u32>,
}

impl Agent {
    /// Create an unprisonized agent with every other feature drawn uniformly
    pub fn new<R: Rng + ?Sized>(row: usize, col: usize, space: &TraitSpace, rng: &mut R) -> Self {
        let mut agent = Self {
            row,
            col,
            traits: vec![0; space.feature_count()],
        };
        agent.randomize_traits(space, rng);
        agent.set_trait(PRISONIZATION_FEATURE, NOT_PRISONIZED);
        agent
    }

    /// Create an agent with explicit traits. Callers validate against the schema.
    pub(crate) fn with_traits(row: usize, col: usize, traits: Vec<u32>) -> Self {
        Self { row, col, traits }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn traits(&self) -> &[u32] {
        &self.traits
    }

    /// Redraw every feature except the prisonization marker
    pub fn randomize_traits<R: Rng + ?Sized>(&mut self, space: &TraitSpace, rng: &mut R) {
        for feature in 1..space.feature_count() {
            self.traits[feature] = space.random_trait(feature, rng);
        }
    }

    pub fn set_trait(&mut self, which: usize, value: u32) {
        self.traits[which] = value;
    }

    pub fn is_prisonized(&self) -> bool {
        self.traits[PRISONIZATION_FEATURE] == PRISONIZED
    }

    /// Fraction of features on which both agents hold the same trait
    pub fn similarity(&self, other: &Agent) -> f64 {
        if self.traits.is_empty() {
            return 1.0;
        }
        let matching = self
            .traits
            .iter()
            .zip(&other.traits)
            .filter(|(a, b)| a == b)
            .count();
        matching as f64 / self.traits.len() as f64
    }

    /// Feature indices where the two agents disagree
    pub fn differing_traits(&self, other: &Agent) -> Vec<usize> {
        self.traits
            .iter()
            .zip(&other.traits)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(feature, _)| feature)
            .collect()
    }

    /// Bernoulli draw weighted by similarity.
    ///
    /// Total agreement and total disagreement never influence, and in those
    /// cases no random number is consumed.
    pub fn is_influenced<R: Rng + ?Sized>(&self, other: &Agent, rng: &mut R) -> bool {
        let similarity = self.similarity(other);
        if !partially_similar(similarity) {
            return false;
        }
        rng.gen::<f64>() < similarity
    }

    /// Whether any of the four neighbors is partially similar
    pub fn influence_possible(&self, population: &Population) -> bool {
        population
            .neighbors(self.row, self.col)
            .iter()
            .any(|neighbor| partially_similar(self.similarity(neighbor)))
    }

    /// Pick a differing feature uniformly, returning it with the neighbor's value.
    ///
    /// `None` when the agents are identical.
    pub fn choose_inheritance<R: Rng + ?Sized>(
        &self,
        other: &Agent,
        rng: &mut R,
    ) -> Option<(usize, u32)> {
        self.differing_traits(other)
            .choose(rng)
            .map(|&feature| (feature, other.traits[feature]))
    }

    /// Copy one randomly chosen differing trait from `other`.
    ///
    /// No-op returning `None` when there is nothing to inherit.
    pub fn inherit_trait<R: Rng + ?Sized>(&mut self, other: &Agent, rng: &mut R) -> Option<usize> {
        let (feature, value) = self.choose_inheritance(other, rng)?;
        self.set_trait(feature, value);
        Some(feature)
    }
}
