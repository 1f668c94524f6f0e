//! Output Module
//!
//! Run statistics collection and population snapshots.

pub mod snapshot;
pub mod stats;

pub use snapshot::capture;
pub use stats::StatsCollector;
