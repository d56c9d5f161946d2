//! Simulation engine: agent arena, ancestry resolution, mating, and
//! post-run analysis for multi-generation population runs.

pub mod agent;
pub mod analysis;
pub mod ancestry;
pub mod arena;
pub mod mating;
pub mod simulation;

#[cfg(test)]
mod testutil;

pub use agent::Agent;
pub use ancestry::{count_common_sorted, generational_distance, IdSet};
pub use arena::Arena;
pub use mating::{CompatibilityPolicy, MatingPair, Strategy};
pub use simulation::Simulation;
