//! Ancestry resolution over the parent graph.

use crate::arena::Arena;
use pedigree_core::AgentId;
use std::collections::HashSet;

/// Integer hash-set over agent ids, used as the membership mirror of a
/// sorted ancestor vector.
#[derive(Debug, Clone, Default)]
pub struct IdSet(HashSet<usize>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`, returning `true` if it was not already present.
    pub fn insert(&mut self, id: AgentId) -> bool {
        self.0.insert(id.index())
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.0.contains(&id.index())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.0.iter().map(|&i| AgentId(i))
    }
}

/// Compute the full set of strict ancestors of `id` by frontier
/// expansion over mother/father edges, and store it on the agent as
/// both a sorted vector and a membership set.
///
/// The frontier starts with `id` itself and a read cursor at 0; each
/// inspected agent enqueues its parents unless it is a founder (whose
/// conventional zero parent ids must never be followed) or the parent
/// is already known. The collected ids are sorted ascending and the
/// query id dropped: ancestors always carry strictly lower ids, so
/// after sorting the query id sits at the end.
///
/// Cost is O(distinct ancestors) amortized via the membership check.
pub fn resolve_ancestors(arena: &mut Arena, id: AgentId) {
    let mut set = IdSet::new();
    let mut frontier: Vec<AgentId> = Vec::with_capacity(arena[id].generation * 2 + 1);
    frontier.push(id);
    let mut cursor = 0;
    while cursor < frontier.len() {
        let current = frontier[cursor];
        cursor += 1;
        if arena[current].generation == 0 {
            continue;
        }
        let mother = arena[current].mother;
        let father = arena[current].father;
        for parent in [mother, father] {
            if set.insert(parent) {
                frontier.push(parent);
            }
        }
    }
    frontier.sort_unstable();
    frontier.truncate(frontier.len() - 1);
    arena[id].ancestors = frontier;
    arena[id].ancestor_set = set;
}

/// Resolve ancestors for every agent of the given generation. Other
/// generations' ancestor fields stay empty, bounding memory to the
/// generation under analysis.
pub fn resolve_generation(arena: &mut Arena, generation: usize) {
    for index in arena.generation_span(generation) {
        resolve_ancestors(arena, AgentId(index));
    }
}

/// Count the elements common to two ascending, duplicate-free
/// sequences with a linear two-pointer merge.
pub fn count_common_sorted<T: Ord>(a: &[T], b: &[T]) -> usize {
    let (mut i, mut j, mut total) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                total += 1;
                i += 1;
                j += 1;
            }
        }
    }
    total
}

/// Number of generations separating `a` from its most recent ancestor
/// shared with `b`. Both agents must have been resolved.
///
/// Scans `a`'s ancestor vector from the end: ids increase with recency,
/// so the first hit in `b`'s membership set is the nearest shared
/// ancestor. When no ancestor is shared the scan falls through to
/// generation 0 and the result is the full depth `a.generation`, which
/// conflates "unrelated" with "maximally distant"; callers treating
/// that case specially must check for it themselves.
pub fn generational_distance(arena: &Arena, a: AgentId, b: AgentId) -> usize {
    let mut found_generation = 0;
    for &ancestor in arena[a].ancestors.iter().rev() {
        if arena[b].ancestor_set.contains(ancestor) {
            found_generation = arena[ancestor].generation;
            break;
        }
    }
    arena[a].generation - found_generation
}
