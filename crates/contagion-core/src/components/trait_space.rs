//! Trait Space
//!
//! The fixed schema of cultural features shared by every agent in a run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Feature index of the binary prisonization marker
pub const PRISONIZATION_FEATURE: usize = 0;

/// Trait value meaning "prisonized" on the prisonization feature
pub const PRISONIZED: u32 = 1;

/// Trait value meaning "not prisonized" on the prisonization feature
pub const NOT_PRISONIZED: u32 = 0;

/// Number of features and how many trait values each may take.
///
/// Immutable once built. Feature 0 is always the binary prisonization
/// indicator; every other feature is an arbitrary categorical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitSpace {
    trait_counts: Vec<u32>,
}

impl TraitSpace {
    /// Validate and build a trait space.
    ///
    /// Fails if `trait_counts` is empty, if feature 0 is not binary, or if any
    /// feature has no possible values.
    pub fn new(trait_counts: Vec<u32>) -> Result<Self> {
        match trait_counts.first() {
            None => {
                return Err(SimError::InvalidTraitSpace(
                    "at least one feature is required".into(),
                ))
            }
            Some(&2) => {}
            Some(&other) => {
                return Err(SimError::InvalidTraitSpace(format!(
                    "feature 0 must be binary (2 traits), got {}",
                    other
                )))
            }
        }

        if let Some(index) = trait_counts.iter().position(|&count| count == 0) {
            return Err(SimError::InvalidTraitSpace(format!(
                "feature {} has no possible traits",
                index
            )));
        }

        Ok(Self { trait_counts })
    }

    pub fn feature_count(&self) -> usize {
        self.trait_counts.len()
    }

    /// Number of distinct values `feature` can take
    pub fn trait_count(&self, feature: usize) -> u32 {
        self.trait_counts[feature]
    }

    pub fn trait_counts(&self) -> &[u32] {
        &self.trait_counts
    }

    /// Whether `value` lies in the domain of `feature`
    pub fn contains(&self, feature: usize, value: u32) -> bool {
        self.trait_counts
            .get(feature)
            .map_or(false, |&count| value < count)
    }

    /// Check a full trait vector against the schema
    pub fn validate_traits(&self, traits: &[u32]) -> Result<()> {
        if traits.len() != self.feature_count() {
            return Err(SimError::InvalidTraits(format!(
                "expected {} features, got {}",
                self.feature_count(),
                traits.len()
            )));
        }
        for (feature, &value) in traits.iter().enumerate() {
            if !self.contains(feature, value) {
                return Err(SimError::InvalidTraits(format!(
                    "trait {} out of range for feature {} ({} values)",
                    value, feature, self.trait_counts[feature]
                )));
            }
        }
        Ok(())
    }

    /// Uniform random trait for a feature
    pub fn random_trait<R: Rng + ?Sized>(&self, feature: usize, rng: &mut R) -> u32 {
        rng.gen_range(0..self.trait_counts[feature])
    }
}

impl<'de> Deserialize<'de> for TraitSpace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            trait_counts: Vec<u32>,
        }
        let raw = Raw::deserialize(deserializer)?;
        TraitSpace::new(raw.trait_counts).map_err(serde::de::Error::custom)
    }
}
