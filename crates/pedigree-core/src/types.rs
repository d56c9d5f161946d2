//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent: its dense index into the arena.
///
/// Ids are assigned sequentially at birth and never change, so an id
/// doubles as the agent's position in the arena and ids increase with
/// recency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary sex of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Draw a sex uniformly from the given random source.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// A gene label of the form `founder-slot` with one trailing backtick
/// per mutation, e.g. `3-7` or `3-7```.
///
/// The founder index records which generation-0 agent contributed the
/// gene; the slot is its position in that founder's genome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene(String);

impl Gene {
    /// Fresh label for slot `slot` of founder `id`.
    pub fn founder(id: AgentId, slot: usize) -> Self {
        Gene(format!("{}-{}", id, slot))
    }

    /// Wrap an existing label verbatim. Frequency analysis rejects
    /// labels whose founder index does not parse.
    pub fn from_raw(label: impl Into<String>) -> Self {
        Gene(label.into())
    }

    /// Append one mutation mark to the label.
    pub fn mutate(&mut self) {
        self.0.push('`');
    }

    /// The founder that originally contributed this gene, or `None` if
    /// the label does not start with a decimal founder index.
    pub fn founder_id(&self) -> Option<AgentId> {
        let head = self.0.split('-').next()?;
        head.parse().ok().map(AgentId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
