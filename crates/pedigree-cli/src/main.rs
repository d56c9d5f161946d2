//! Command-line shell around the simulation engine: flag parsing,
//! logging setup, and parallel fan-out of independent runs.

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use pedigree_core::{AnalysisSelection, Parameters};
use pedigree_engine::Simulation;
use rayon::prelude::*;
use std::io::{self, Write};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pedigree",
    version,
    about = "Simulate population growth over generations to study ancestry and inheritance"
)]
struct Cli {
    /// Id of the first simulation
    #[arg(long, default_value_t = 0)]
    id: u64,

    /// Number of founding agents
    #[arg(long, default_value_t = 2)]
    agents: usize,

    /// Number of generations to run for
    #[arg(long, default_value_t = 32)]
    generations: usize,

    /// Growth rate of the population
    #[arg(long, default_value_t = 1.02)]
    growth: f64,

    /// Agents are monogamous
    #[arg(long)]
    monog: bool,

    /// Number of agents to search for a compatible match
    #[arg(long = "matingk", default_value_t = 50)]
    mating_k: usize,

    /// Enforce mating compatibility checks
    #[arg(long)]
    compatible: bool,

    /// Agents can mate with themselves
    #[arg(long = "mateself")]
    mate_self: bool,

    /// Agents can mate with siblings
    #[arg(long = "matesibling")]
    mate_sibling: bool,

    /// Agents can mate with cousins
    #[arg(long = "matecousin")]
    mate_cousin: bool,

    /// Agents can mate with the same sex
    #[arg(long = "matesamesex")]
    mate_same_sex: bool,

    /// Number of genes per agent in the initial generation
    #[arg(long, default_value_t = 10)]
    genes: usize,

    /// Gene mutation rate
    #[arg(long, default_value_t = 0.0)]
    mutation: f64,

    /// Reports to produce: N ancestor counts, C common ancestors,
    /// D generation differences, G gene analysis, g gene analysis on
    /// the last generation only
    #[arg(long, default_value = "NCDGg")]
    analysis: AnalysisSelection,

    /// Number of simulations to run (in parallel)
    #[arg(long = "numsims", default_value_t = 1)]
    num_sims: u64,

    /// Base random seed; instance i runs with seed + i. Fresh entropy
    /// per instance when unset
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Parameters for the instance at `offset` in the fan-out.
    fn parameters(&self, offset: u64) -> Parameters {
        Parameters {
            simulation_id: self.id + offset,
            founders: self.agents,
            generations: self.generations,
            growth_rate: self.growth,
            monogamous: self.monog,
            compatible: self.compatible,
            mating_search: self.mating_k,
            genes: self.genes,
            mutation_rate: self.mutation,
            mate_self: self.mate_self,
            mate_sibling: self.mate_sibling,
            mate_cousin: self.mate_cousin,
            mate_same_sex: self.mate_same_sex,
            analysis: self.analysis,
            seed: self.seed.map(|base| base + offset),
        }
    }
}

/// Run one instance to completion and render its full report into a
/// private buffer, so the shared sink sees each report as one block.
fn run_instance(params: Parameters) -> pedigree_core::Result<Vec<u8>> {
    let mut simulation = Simulation::new(params);
    simulation.run()?;
    let mut report = Vec::new();
    simulation.analyze(&mut report)?;
    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let sink = Mutex::new(io::stdout());

    let failures: u64 = (0..cli.num_sims)
        .into_par_iter()
        .map(|offset| {
            let params = cli.parameters(offset);
            match run_instance(params) {
                Ok(report) => {
                    let mut out = sink.lock();
                    if let Err(err) = out.write_all(&report) {
                        error!("{err}");
                        return 1;
                    }
                    0
                }
                Err(err) => {
                    // Fatal conditions carry their simulation id; one
                    // instance failing never affects its siblings.
                    eprintln!("{err}");
                    1
                }
            }
        })
        .sum();

    if failures > 0 {
        anyhow::bail!("{failures} of {} simulation(s) failed", cli.num_sims);
    }
    Ok(())
}
