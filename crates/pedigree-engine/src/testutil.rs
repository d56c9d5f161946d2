//! Hand-built pedigree shared by the engine's unit tests.

use crate::agent::Agent;
use crate::arena::Arena;
use pedigree_core::{AgentId, Sex};

fn agent(
    id: usize,
    generation: usize,
    sex: Sex,
    mother: usize,
    father: usize,
    children: &[usize],
) -> Agent {
    Agent {
        id: AgentId(id),
        generation,
        sex,
        mother: AgentId(mother),
        father: AgentId(father),
        children: children.iter().map(|&c| AgentId(c)).collect(),
        ..Agent::default()
    }
}

/// Four-generation, 14-agent pedigree:
///
/// founders 0,1 -> 2,3,4 -> (3x4) 5,6,7,8 -> 9,10 (from 5x7) and
/// 11,12,13 (from 8x6). Generation spans are [0,2), [2,5), [5,9),
/// [9,14).
pub(crate) fn pedigree_fixture() -> Arena {
    let agents = vec![
        agent(0, 0, Sex::Male, 0, 0, &[2, 3, 4]),
        agent(1, 0, Sex::Male, 0, 0, &[2, 3, 4]),
        agent(2, 1, Sex::Female, 0, 1, &[]),
        agent(3, 1, Sex::Male, 0, 1, &[5, 6, 7, 8]),
        agent(4, 1, Sex::Male, 0, 1, &[5, 6, 7, 8]),
        agent(5, 2, Sex::Female, 3, 4, &[9, 10]),
        agent(6, 2, Sex::Male, 3, 4, &[11, 12, 13]),
        agent(7, 2, Sex::Female, 3, 4, &[9, 10]),
        agent(8, 2, Sex::Male, 3, 4, &[11, 12, 13]),
        agent(9, 3, Sex::Male, 5, 7, &[]),
        agent(10, 3, Sex::Female, 5, 7, &[]),
        agent(11, 3, Sex::Female, 8, 6, &[]),
        agent(12, 3, Sex::Female, 8, 6, &[]),
        agent(13, 3, Sex::Female, 8, 6, &[]),
    ];
    Arena::from_agents(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_boundaries() {
        let arena = pedigree_fixture();
        assert_eq!(arena.len(), 14);
        assert_eq!(arena.boundaries(), &[2, 5, 9, 14]);
    }
}
