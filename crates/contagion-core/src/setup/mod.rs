//! Population Setup
//!
//! Initial prisonization of a freshly built population.

pub mod seeding;

pub use seeding::*;
