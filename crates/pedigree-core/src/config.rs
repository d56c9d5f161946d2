//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which reports the analysis engine produces after a run.
///
/// Parsed from a letter string: `N` ancestor counts, `C` common
/// ancestors, `D` generational distances, `G` gene frequencies, `g`
/// restricts gene frequencies to the last generation. Unknown letters
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSelection {
    /// Min/max/mean ancestor counts over the last generation
    pub ancestor_counts: bool,
    /// Pairwise shared-ancestor counts over the last generation
    pub common_ancestors: bool,
    /// Pairwise generational distances within the last generation
    pub generational_distance: bool,
    /// Gene and founder frequency tables
    pub gene_frequency: bool,
    /// Run gene frequency only on the last generation
    pub genes_last_generation_only: bool,
}

impl AnalysisSelection {
    pub const fn none() -> Self {
        Self {
            ancestor_counts: false,
            common_ancestors: false,
            generational_distance: false,
            gene_frequency: false,
            genes_last_generation_only: false,
        }
    }
}

impl Default for AnalysisSelection {
    fn default() -> Self {
        "NCDGg".parse().unwrap_or_else(|_| Self::none())
    }
}

impl FromStr for AnalysisSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self {
            ancestor_counts: s.contains('N'),
            common_ancestors: s.contains('C'),
            generational_distance: s.contains('D'),
            gene_frequency: s.contains('G'),
            genes_last_generation_only: s.contains('g'),
        })
    }
}

impl fmt::Display for AnalysisSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (enabled, letter) in [
            (self.ancestor_counts, 'N'),
            (self.common_ancestors, 'C'),
            (self.generational_distance, 'D'),
            (self.gene_frequency, 'G'),
            (self.genes_last_generation_only, 'g'),
        ] {
            if enabled {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// Run parameters, fixed for the lifetime of one simulation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Identifier tagging every output record of this run
    pub simulation_id: u64,
    /// Number of generation-0 agents
    pub founders: usize,
    /// Number of generation steps to run
    pub generations: usize,
    /// Offspring iterations per step = ceil(growth_rate * generation size)
    pub growth_rate: f64,
    /// Each agent mates with at most one partner per generation
    pub monogamous: bool,
    /// Enforce compatibility rules when pairing
    pub compatible: bool,
    /// Bounded search width for partner lookup
    pub mating_search: usize,
    /// Genes per founder genome
    pub genes: usize,
    /// Per-gene mutation probability at inheritance (0 disables)
    pub mutation_rate: f64,
    /// Agents may mate with themselves
    pub mate_self: bool,
    /// Agents may mate with siblings
    pub mate_sibling: bool,
    /// Agents may mate with cousins
    pub mate_cousin: bool,
    /// Agents may mate with the same sex
    pub mate_same_sex: bool,
    /// Reports to produce after the run
    pub analysis: AnalysisSelection,
    /// Seed for the instance-owned random stream; fresh entropy if unset
    pub seed: Option<u64>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            simulation_id: 0,
            founders: 2,
            generations: 32,
            growth_rate: 1.02,
            monogamous: false,
            compatible: false,
            mating_search: 50,
            genes: 10,
            mutation_rate: 0.0,
            mate_self: false,
            mate_sibling: false,
            mate_cousin: false,
            mate_same_sex: false,
            analysis: AnalysisSelection::default(),
            seed: None,
        }
    }
}
