//! Run Loop
//!
//! Plain functions over `Population`, no ECS scheduling: the step/check loop,
//! its observers, and the end-to-end simulation driver.

pub mod run;
pub mod simulation;

pub use run::{RunObserver, RunOutcome};
pub use simulation::{RunOptions, Simulation};
