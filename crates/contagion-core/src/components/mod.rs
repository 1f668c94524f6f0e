//! Model Types
//!
//! Plain model types, no ECS: the trait schema, individual agents, and the
//! toroidal population grid that owns them.

pub mod agent;
pub mod population;
pub mod trait_space;

pub use agent::*;
pub use population::*;
pub use trait_space::*;
