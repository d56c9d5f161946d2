//! Agent state.

use crate::ancestry::IdSet;
use pedigree_core::{AgentId, Gene, Sex};

/// An individual in the simulation.
///
/// Agents are immutable after creation except for two append-only
/// fields: the child list (extended when the agent parents offspring)
/// and the ancestor vector/set (populated once by an explicit
/// resolution call, and only for the generation under analysis).
///
/// Founders carry `AgentId(0)` for both parents by convention; the
/// generation-0 check everywhere short-circuits before those ids are
/// ever followed.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    pub id: AgentId,
    pub generation: usize,
    pub sex: Sex,
    pub mother: AgentId,
    pub father: AgentId,
    pub children: Vec<AgentId>,
    /// Strict ancestors, ascending and duplicate-free, self excluded
    pub ancestors: Vec<AgentId>,
    /// Membership mirror of `ancestors`
    pub ancestor_set: IdSet,
    pub genes: Vec<Gene>,
}

impl Agent {
    /// Create a generation-0 agent with fresh gene labels `id-0..id-(genes-1)`.
    pub fn founder(id: AgentId, sex: Sex, genes: usize) -> Self {
        Self {
            id,
            generation: 0,
            sex,
            mother: AgentId(0),
            father: AgentId(0),
            children: Vec::new(),
            ancestors: Vec::new(),
            ancestor_set: IdSet::new(),
            genes: (0..genes).map(|slot| Gene::founder(id, slot)).collect(),
        }
    }

    pub fn is_founder(&self) -> bool {
        self.generation == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_founder_creation() {
        let agent = Agent::founder(AgentId(4), Sex::Female, 3);
        assert_eq!(agent.id, AgentId(4));
        assert!(agent.is_founder());
        assert_eq!(agent.mother, AgentId(0));
        assert_eq!(agent.father, AgentId(0));
        assert_eq!(
            agent.genes.iter().map(Gene::as_str).collect::<Vec<_>>(),
            vec!["4-0", "4-1", "4-2"]
        );
        assert!(agent.ancestors.is_empty());
        assert!(agent.ancestor_set.is_empty());
    }
}
