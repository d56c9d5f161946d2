//! Append-only agent store and generation index.

use crate::agent::Agent;
use pedigree_core::{AgentId, Gene, Sex};
use rand::Rng;
use std::ops::{Index, IndexMut, Range};

/// Dense, append-only store of agents partitioned into generations.
///
/// An agent's id is its index into the store. Agents are appended in
/// non-decreasing generation order, and the boundary vector records,
/// per generation, the index one past that generation's last agent.
/// The final boundary always equals the arena length.
#[derive(Debug, Default)]
pub struct Arena {
    agents: Vec<Agent>,
    boundaries: Vec<usize>,
}

impl Arena {
    /// Seed the arena with `founders` generation-0 agents of random sex,
    /// each carrying `genes` fresh gene labels.
    pub fn seed<R: Rng>(founders: usize, genes: usize, rng: &mut R) -> Self {
        let agents: Vec<Agent> = (0..founders)
            .map(|i| Agent::founder(AgentId(i), Sex::random(rng), genes))
            .collect();
        let boundaries = vec![agents.len()];
        Self { agents, boundaries }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Generation boundaries; entry `g` is one past the last agent of
    /// generation `g`.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Generation number of the most recently appended agent, or `None`
    /// for an empty arena.
    pub fn last_generation(&self) -> Option<usize> {
        self.agents.last().map(|agent| agent.generation)
    }

    /// Index range of the agents belonging to generation `generation`.
    /// Empty range for a generation that does not exist.
    pub fn generation_span(&self, generation: usize) -> Range<usize> {
        if generation >= self.boundaries.len() {
            return 0..0;
        }
        let start = if generation == 0 {
            0
        } else {
            self.boundaries[generation - 1]
        };
        start..self.boundaries[generation]
    }

    /// Record the end of the generation under construction at the
    /// current arena length.
    pub fn push_boundary(&mut self) {
        self.boundaries.push(self.agents.len());
    }

    /// Append a newborn with the next sequential id and register it in
    /// both parents' child lists.
    pub fn push_offspring(
        &mut self,
        father: AgentId,
        mother: AgentId,
        generation: usize,
        sex: Sex,
        genes: Vec<Gene>,
    ) -> AgentId {
        let id = AgentId(self.agents.len());
        self.agents.push(Agent {
            id,
            generation,
            sex,
            mother,
            father,
            genes,
            ..Agent::default()
        });
        self.agents[father.index()].children.push(id);
        self.agents[mother.index()].children.push(id);
        id
    }

    /// Rebuild the boundary vector by rescanning the arena for
    /// generation transitions. The simulation driver maintains the
    /// index incrementally; this rescan exists for recovery and for
    /// tests that assemble an arena by hand.
    pub fn rebuild_boundaries(&mut self) {
        self.boundaries.clear();
        if self.agents.is_empty() {
            return;
        }
        let mut generation = self.agents[0].generation;
        for (i, agent) in self.agents.iter().enumerate() {
            if agent.generation != generation {
                generation = agent.generation;
                self.boundaries.push(i);
            }
        }
        self.boundaries.push(self.agents.len());
    }

    #[cfg(test)]
    pub(crate) fn from_agents(agents: Vec<Agent>) -> Self {
        let mut arena = Self {
            agents,
            boundaries: Vec::new(),
        };
        arena.rebuild_boundaries();
        arena
    }

    #[cfg(test)]
    pub(crate) fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }
}

impl Index<AgentId> for Arena {
    type Output = Agent;

    fn index(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }
}

impl IndexMut<AgentId> for Arena {
    fn index_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }
}
