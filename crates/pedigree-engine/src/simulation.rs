//! Generation-by-generation simulation driver.

use crate::arena::Arena;
use crate::mating::{pair_agents, CompatibilityPolicy, MatingPair, PoolMember, Strategy};
use pedigree_core::{AgentId, Error, Gene, Parameters, Result, Sex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// One simulation instance: arena, generation index, mating pools, and
/// an instance-owned random stream.
///
/// Instances share no mutable state, so any number of them can run
/// concurrently under an external driver; a run either completes or
/// fails as a unit.
pub struct Simulation {
    id: u64,
    params: Parameters,
    arena: Arena,
    /// Snapshot of the generation currently eligible to reproduce
    current: Vec<PoolMember>,
    /// Exclusive pairs, rebuilt per step under the monogamous strategy
    pairs: Vec<MatingPair>,
    strategy: Strategy,
    policy: CompatibilityPolicy,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn new(params: Parameters) -> Self {
        let mut rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let arena = Arena::seed(params.founders, params.genes, &mut rng);
        let current = arena
            .generation_span(0)
            .map(|index| PoolMember::new(AgentId(index)))
            .collect();
        Self {
            id: params.simulation_id,
            strategy: Strategy::from_flags(params.monogamous, params.compatible),
            policy: CompatibilityPolicy::from_parameters(&params),
            arena,
            current,
            pairs: Vec::new(),
            rng,
            params,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Run all configured generation steps. Strictly sequential: a
    /// step's offspring must be fully materialized before the next
    /// step samples parents from them.
    pub fn run(&mut self) -> Result<()> {
        info!(
            simulation = self.id,
            founders = self.params.founders,
            generations = self.params.generations,
            strategy = ?self.strategy,
            "starting simulation"
        );
        for generation in 1..=self.params.generations {
            self.step(generation)?;
        }
        info!(
            simulation = self.id,
            agents = self.arena.len(),
            "simulation complete"
        );
        Ok(())
    }

    fn step(&mut self, generation: usize) -> Result<()> {
        if self.current.len() < 2 {
            return Err(Error::InsufficientSurvivors {
                simulation: self.id,
                generation,
                alive: self.current.len(),
            });
        }
        // Random pool order breaks the positional bias of the greedy
        // windowed pairing.
        self.current.shuffle(&mut self.rng);
        match self.strategy {
            Strategy::Unconstrained => self.breed_unconstrained(generation),
            Strategy::NonMonogamous => self.breed_non_monogamous(generation),
            Strategy::Monogamous => self.breed_monogamous(generation)?,
        }
        self.arena.push_boundary();
        self.refresh_current(generation);
        debug!(
            simulation = self.id,
            generation,
            alive = self.current.len(),
            total = self.arena.len(),
            "generation step complete"
        );
        Ok(())
    }

    /// Offspring-creation iterations for this step.
    fn offspring_quota(&self) -> usize {
        (self.params.growth_rate * self.current.len() as f64).ceil() as usize
    }

    fn random_member(&mut self) -> AgentId {
        self.current[self.rng.gen_range(0..self.current.len())].id
    }

    fn breed_unconstrained(&mut self, generation: usize) {
        for _ in 0..self.offspring_quota() {
            let father = self.random_member();
            let mother = self.random_member();
            self.breed_child(father, mother, generation);
        }
    }

    fn breed_non_monogamous(&mut self, generation: usize) {
        for _ in 0..self.offspring_quota() {
            let first = self.random_member();
            let mut partner = None;
            for _ in 0..self.params.mating_search {
                let candidate = self.random_member();
                if self.policy.compatible(&self.arena, first, candidate) {
                    partner = Some(candidate);
                    break;
                }
            }
            // Exhausting the retry budget skips this offspring
            // iteration; the run continues.
            let Some(second) = partner else {
                debug!(
                    simulation = self.id,
                    generation,
                    agent = %first,
                    budget = self.params.mating_search,
                    "no compatible partner found, skipping iteration"
                );
                continue;
            };
            self.breed_child(first, second, generation);
        }
    }

    fn breed_monogamous(&mut self, generation: usize) -> Result<()> {
        self.pairs = pair_agents(
            &self.arena,
            &mut self.current,
            self.params.mating_search,
            &self.policy,
        );
        if self.pairs.is_empty() {
            return Err(Error::NoMatingPairs {
                simulation: self.id,
                generation,
            });
        }
        for _ in 0..self.offspring_quota() {
            let pair = self.pairs[self.rng.gen_range(0..self.pairs.len())];
            self.breed_child(pair.male, pair.female, generation);
        }
        Ok(())
    }

    /// Create one offspring: random sex, each gene inherited from
    /// either parent with equal probability, optionally picking up a
    /// mutation mark.
    fn breed_child(&mut self, father: AgentId, mother: AgentId, generation: usize) {
        let sex = Sex::random(&mut self.rng);
        let mut genes: Vec<Gene> = Vec::with_capacity(self.params.genes);
        for slot in 0..self.params.genes {
            let mut gene = if self.rng.gen_bool(0.5) {
                self.arena[father].genes[slot].clone()
            } else {
                self.arena[mother].genes[slot].clone()
            };
            if self.params.mutation_rate > 0.0 && self.rng.gen::<f64>() < self.params.mutation_rate
            {
                gene.mutate();
            }
            genes.push(gene);
        }
        self.arena
            .push_offspring(father, mother, generation, sex, genes);
    }

    fn refresh_current(&mut self, generation: usize) {
        self.current.clear();
        self.current.extend(
            self.arena
                .generation_span(generation)
                .map(|index| PoolMember::new(AgentId(index))),
        );
    }
}
