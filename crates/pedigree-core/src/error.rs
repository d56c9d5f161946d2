//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal run conditions. Every variant carries the simulation id so a
/// failure among concurrently-running instances can be attributed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{simulation}, sim-eng-err, insufficient survivors for generation, {alive}, {generation}")]
    InsufficientSurvivors {
        simulation: u64,
        generation: usize,
        alive: usize,
    },

    #[error("{simulation}, sim-eng-err, no mating pairs for generation, {generation}")]
    NoMatingPairs { simulation: u64, generation: usize },

    #[error("{simulation}, analysis-err, no agents in simulation")]
    EmptyPopulation { simulation: u64 },

    #[error("{simulation}, analysis-err, only zero generation exists")]
    OnlyFounders { simulation: u64 },

    #[error("{simulation}, rpt-genes-err, malformed gene label, {label}")]
    MalformedGene { simulation: u64, label: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
