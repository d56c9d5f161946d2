//! Partner compatibility and pairing.

use crate::agent::Agent;
use crate::arena::Arena;
use pedigree_core::{AgentId, Parameters, Sex};

/// Two agents are siblings when they share a mother or father id and
/// both sit above generation 0. Founders all carry the conventional
/// zero parent ids, so a generation-0 agent is never anyone's sibling.
pub fn is_sibling(a: &Agent, b: &Agent) -> bool {
    a.generation > 0 && b.generation > 0 && (a.mother == b.mother || a.father == b.father)
}

/// Two agents are cousins when both sit at generation >= 2 and any of
/// the four parent pairings are siblings. Deeper relations
/// (great-cousins and beyond) are deliberately not detected.
pub fn is_cousin(arena: &Arena, a: &Agent, b: &Agent) -> bool {
    if a.generation < 2 || b.generation < 2 {
        return false;
    }
    let a_mother = &arena[a.mother];
    let a_father = &arena[a.father];
    let b_mother = &arena[b.mother];
    let b_father = &arena[b.father];
    is_sibling(a_mother, b_mother)
        || is_sibling(a_mother, b_father)
        || is_sibling(a_father, b_mother)
        || is_sibling(a_father, b_father)
}

/// The per-rule mating toggles, evaluated as an ordered short-circuit
/// chain: self, same-sex, sibling, cousin. The first failing rule
/// rejects the pair.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityPolicy {
    pub allow_self: bool,
    pub allow_same_sex: bool,
    pub allow_sibling: bool,
    pub allow_cousin: bool,
}

impl CompatibilityPolicy {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            allow_self: params.mate_self,
            allow_same_sex: params.mate_same_sex,
            allow_sibling: params.mate_sibling,
            allow_cousin: params.mate_cousin,
        }
    }

    pub fn compatible(&self, arena: &Arena, a: AgentId, b: AgentId) -> bool {
        let first = &arena[a];
        let second = &arena[b];
        if !self.allow_self && first.id == second.id {
            return false;
        }
        if !self.allow_same_sex && first.sex == second.sex {
            return false;
        }
        if !self.allow_sibling && is_sibling(first, second) {
            return false;
        }
        if !self.allow_cousin && is_cousin(arena, first, second) {
            return false;
        }
        true
    }
}

/// Pool entry tracking whether an agent has already been claimed by a
/// pair this generation.
#[derive(Debug, Clone, Copy)]
pub struct PoolMember {
    pub id: AgentId,
    pub mated: bool,
}

impl PoolMember {
    pub fn new(id: AgentId) -> Self {
        Self { id, mated: false }
    }
}

/// An exclusive pair, oriented as (male, female).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatingPair {
    pub male: AgentId,
    pub female: AgentId,
}

impl MatingPair {
    fn oriented(a: &Agent, b: &Agent) -> Self {
        if a.sex == Sex::Male {
            Self {
                male: a.id,
                female: b.id,
            }
        } else {
            Self {
                male: b.id,
                female: a.id,
            }
        }
    }
}

/// Greedy windowed matcher over an already-shuffled pool.
///
/// For each not-yet-mated member in order, scan at most `search_width`
/// subsequent members and claim the first compatible one. This is not
/// a maximum matching: an incompatible tail simply sits out the
/// generation.
pub fn pair_agents(
    arena: &Arena,
    pool: &mut [PoolMember],
    search_width: usize,
    policy: &CompatibilityPolicy,
) -> Vec<MatingPair> {
    let mut pairs = Vec::new();
    for i in 0..pool.len() {
        if pool[i].mated {
            continue;
        }
        let hi = pool.len().min(i + search_width);
        for j in (i + 1)..hi {
            if pool[j].mated {
                continue;
            }
            let (a, b) = (pool[i].id, pool[j].id);
            if policy.compatible(arena, a, b) {
                pairs.push(MatingPair::oriented(&arena[a], &arena[b]));
                pool[i].mated = true;
                pool[j].mated = true;
                break;
            }
        }
    }
    pairs
}

/// The three breeding strategies, selected once at construction from
/// the monogamy and compatibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform random parent draws, no compatibility checks
    Unconstrained,
    /// Random draws with a bounded compatibility retry budget
    NonMonogamous,
    /// Exclusive pairs built by the windowed matcher
    Monogamous,
}

impl Strategy {
    pub fn from_flags(monogamous: bool, compatible: bool) -> Self {
        match (monogamous, compatible) {
            (true, _) => Strategy::Monogamous,
            (false, true) => Strategy::NonMonogamous,
            (false, false) => Strategy::Unconstrained,
        }
    }
}
