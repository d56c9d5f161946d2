//! Post-run statistics over a completed simulation.
//!
//! Reports are line-oriented, comma-delimited records, each prefixed
//! with the simulation id and a statistic tag, written to a caller
//! supplied sink.

use crate::ancestry::{count_common_sorted, generational_distance, resolve_generation};
use crate::simulation::Simulation;
use pedigree_core::{AgentId, Error, Result};
use std::collections::HashMap;
use std::io::Write;

/// Min/max/mean accumulator for a stream of counts.
#[derive(Debug, Default)]
struct Summary {
    min: usize,
    max: usize,
    total: usize,
    count: usize,
}

impl Summary {
    fn record(&mut self, value: usize) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.total += value;
        self.count += 1;
    }

    fn mean_over(&self, divisor: f64) -> f64 {
        if divisor == 0.0 {
            0.0
        } else {
            (self.total as f64 / divisor).round()
        }
    }
}

impl Simulation {
    /// Resolve the last generation's ancestry and write the configured
    /// reports.
    ///
    /// Fails up front when there is nothing to analyze: an empty arena,
    /// or a population where only generation 0 exists.
    pub fn analyze<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "{}, parameters, {:?}", self.id(), self.params())?;
        let generation = self
            .arena()
            .last_generation()
            .ok_or(Error::EmptyPopulation {
                simulation: self.id(),
            })?;
        if generation == 0 {
            return Err(Error::OnlyFounders {
                simulation: self.id(),
            });
        }
        resolve_generation(self.arena_mut(), generation);

        let selection = self.params().analysis;
        if selection.ancestor_counts {
            self.report_ancestor_counts(out, generation)?;
        }
        if selection.common_ancestors {
            self.report_common_ancestors(out, generation)?;
        }
        if selection.generational_distance {
            self.report_generational_distance(out, generation)?;
        }
        if selection.gene_frequency {
            self.report_genes(out, selection.genes_last_generation_only)?;
        }
        Ok(())
    }

    /// Min/max/mean ancestor-vector length across the last generation,
    /// alongside the theoretical ceiling of 2^(g+1) - 2 distinct
    /// ancestors.
    fn report_ancestor_counts<W: Write>(&self, out: &mut W, generation: usize) -> Result<()> {
        let span = self.arena().generation_span(generation);
        let mut summary = Summary::default();
        for agent in &self.arena().agents()[span] {
            summary.record(agent.ancestors.len());
        }
        let id = self.id();
        writeln!(
            out,
            "{}, rpt-num-ancestors, tot-agents, {}",
            id,
            self.arena().len()
        )?;
        writeln!(
            out,
            "{}, rpt-num-ancestors, num-agents-last-gen, {}",
            id, summary.count
        )?;
        writeln!(
            out,
            "{}, rpt-num-ancestors, generations, {}, max-ancestors, {:.0}",
            id,
            generation,
            2f64.powi(generation as i32 + 1) - 2.0
        )?;
        writeln!(
            out,
            "{}, rpt-num-ancestors, num-ancestors-last-gen, min, {}, max, {}, mean, {:.1}",
            id,
            summary.min,
            summary.max,
            summary.mean_over(summary.count as f64)
        )?;
        Ok(())
    }

    /// Shared-ancestor counts over every unordered pair of agents in
    /// the last generation, via the linear merge count.
    fn report_common_ancestors<W: Write>(&self, out: &mut W, generation: usize) -> Result<()> {
        let span = self.arena().generation_span(generation);
        let agents = self.arena().agents();
        let mut summary = Summary::default();
        for i in span.clone() {
            for j in (i + 1)..span.end {
                summary.record(count_common_sorted(
                    &agents[i].ancestors,
                    &agents[j].ancestors,
                ));
            }
        }
        let population = span.len() as f64;
        writeln!(
            out,
            "{}, rpt-common-ancestors-last-gen, min, {}, max, {}, mean, {:.1}",
            self.id(),
            summary.min,
            summary.max,
            summary.mean_over(population * population / 2.0)
        )?;
        Ok(())
    }

    /// Generational distances over every unordered pair within the
    /// last generation. Relies on same-generation agents occupying a
    /// contiguous id range.
    fn report_generational_distance<W: Write>(&self, out: &mut W, generation: usize) -> Result<()> {
        let span = self.arena().generation_span(generation);
        let mut summary = Summary::default();
        for i in span.clone() {
            for j in span.start..i {
                summary.record(generational_distance(
                    self.arena(),
                    AgentId(i),
                    AgentId(j),
                ));
            }
        }
        let population = span.len() as f64;
        writeln!(
            out,
            "{}, rpt-generation-diff, generation-diff-last-gen, min, {}, max, {}, mean, {:.1}",
            self.id(),
            summary.min,
            summary.max,
            summary.mean_over(population * population / 2.0)
        )?;
        Ok(())
    }

    /// Gene and founder frequency tables, per generation slice or only
    /// for the last generation.
    fn report_genes<W: Write>(&self, out: &mut W, last_generation_only: bool) -> Result<()> {
        let mut start = 0;
        for &end in self.arena().boundaries() {
            if !last_generation_only || end == self.arena().len() {
                self.report_gene_slice(out, start, end)?;
            }
            start = end;
        }
        Ok(())
    }

    fn report_gene_slice<W: Write>(&self, out: &mut W, start: usize, end: usize) -> Result<()> {
        let agents = &self.arena().agents()[start..end];
        let Some(first) = agents.first() else {
            return Ok(());
        };
        let generation = first.generation;
        let mut gene_table: HashMap<&str, usize> = HashMap::new();
        let mut founder_table: HashMap<AgentId, usize> = HashMap::new();
        for agent in agents {
            for gene in &agent.genes {
                *gene_table.entry(gene.as_str()).or_default() += 1;
                let founder = gene.founder_id().ok_or_else(|| Error::MalformedGene {
                    simulation: self.id(),
                    label: gene.to_string(),
                })?;
                *founder_table.entry(founder).or_default() += 1;
            }
        }
        let id = self.id();
        writeln!(
            out,
            "{}, rpt-genes, num-genes, generation, {}, num, {}",
            id,
            generation,
            gene_table.len()
        )?;
        if let Some((label, count)) = gene_table
            .iter()
            .map(|(label, count)| (*label, *count))
            .max_by_key(|&(label, count)| (count, label))
        {
            writeln!(
                out,
                "{}, rpt-genes, most-common-gene, {}, count, {}",
                id, label, count
            )?;
        }
        writeln!(
            out,
            "{}, rpt-genes, num-founders, generation, {}, count, {}",
            id,
            generation,
            founder_table.len()
        )?;
        if let Some((founder, count)) = founder_table
            .iter()
            .map(|(founder, count)| (*founder, *count))
            .max_by_key(|&(founder, count)| (count, std::cmp::Reverse(founder)))
        {
            writeln!(
                out,
                "{}, rpt-genes, most-common-founder, generation, {}, agent, {}, count, {}",
                id, generation, founder, count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedigree_core::{AnalysisSelection, Gene, Parameters};

    fn run_simulation(params: Parameters) -> Simulation {
        let mut sim = Simulation::new(params);
        sim.run().unwrap();
        sim
    }

    fn base_params() -> Parameters {
        Parameters {
            simulation_id: 42,
            founders: 4,
            generations: 3,
            growth_rate: 1.5,
            seed: Some(23),
            ..Parameters::default()
        }
    }

    fn lines(buffer: &[u8]) -> Vec<String> {
        String::from_utf8(buffer.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_full_report() {
        let mut sim = run_simulation(base_params());
        let mut out = Vec::new();
        sim.analyze(&mut out).unwrap();
        let lines = lines(&out);
        assert!(lines.iter().all(|line| line.starts_with("42, ")));
        assert!(lines.iter().any(|l| l.contains("rpt-num-ancestors")));
        assert!(lines
            .iter()
            .any(|l| l.contains("rpt-common-ancestors-last-gen")));
        assert!(lines.iter().any(|l| l.contains("rpt-generation-diff")));
        assert!(lines.iter().any(|l| l.contains("rpt-genes")));
        // parameters echo comes first
        assert!(lines[0].contains("parameters"));
    }

    #[test]
    fn test_selection_filters_reports() {
        let mut params = base_params();
        params.analysis = "N".parse().unwrap();
        let mut sim = run_simulation(params);
        let mut out = Vec::new();
        sim.analyze(&mut out).unwrap();
        let lines = lines(&out);
        assert!(lines.iter().any(|l| l.contains("rpt-num-ancestors")));
        assert!(!lines.iter().any(|l| l.contains("rpt-generation-diff")));
        assert!(!lines.iter().any(|l| l.contains("rpt-genes")));
    }

    #[test]
    fn test_gene_report_per_generation_vs_last_only() {
        let count_gene_headers = |selection: AnalysisSelection| {
            let mut params = base_params();
            params.analysis = selection;
            let mut sim = run_simulation(params);
            let mut out = Vec::new();
            sim.analyze(&mut out).unwrap();
            lines(&out)
                .iter()
                .filter(|l| l.contains("rpt-genes, num-genes"))
                .count()
        };
        // 4 generations exist (0..=3); `g` restricts to the last one
        assert_eq!(count_gene_headers("G".parse().unwrap()), 4);
        assert_eq!(count_gene_headers("Gg".parse().unwrap()), 1);
    }

    #[test]
    fn test_only_founders_is_an_error() {
        let mut params = base_params();
        params.generations = 0;
        let mut sim = run_simulation(params);
        let mut out = Vec::new();
        let err = sim.analyze(&mut out).unwrap_err();
        assert!(matches!(err, Error::OnlyFounders { simulation: 42 }));
    }

    #[test]
    fn test_empty_population_is_an_error() {
        let mut params = base_params();
        params.founders = 0;
        params.generations = 0;
        let mut sim = run_simulation(params);
        let mut out = Vec::new();
        let err = sim.analyze(&mut out).unwrap_err();
        assert!(matches!(err, Error::EmptyPopulation { simulation: 42 }));
    }

    #[test]
    fn test_malformed_gene_label_is_fatal() {
        let mut sim = run_simulation(base_params());
        sim.arena_mut().agents_mut()[0].genes[0] = Gene::from_raw("not-a-founder");
        let mut out = Vec::new();
        let err = sim.analyze(&mut out).unwrap_err();
        assert!(matches!(err, Error::MalformedGene { simulation: 42, .. }));
    }

    #[test]
    fn test_founder_contributions_bounded_by_founder_count() {
        let mut sim = run_simulation(base_params());
        let mut out = Vec::new();
        sim.analyze(&mut out).unwrap();
        for line in lines(&out) {
            if let Some(rest) = line.split("num-founders, generation, ").nth(1) {
                let count: usize = rest
                    .split("count, ")
                    .nth(1)
                    .unwrap()
                    .trim()
                    .parse()
                    .unwrap();
                assert!(count <= 4);
            }
        }
    }
}
