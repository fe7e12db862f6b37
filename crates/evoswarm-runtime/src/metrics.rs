//! Generation metrics.
//!
//! A [`GenerationReport`] is taken just before the genetic operator runs,
//! while fitness still reflects the finished generation.

use evoswarm_core::agent::Agent;
use evoswarm_core::genome::Genome;
use evoswarm_core::types::Tick;
use serde::{Deserialize, Serialize};

/// Summary of one completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number, starting at 0.
    pub generation: u32,
    /// Ticks the generation lasted.
    pub ticks: Tick,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub worst_fitness: f64,
    /// Overlaps detected during the generation (one per agent per tick).
    pub hits: u64,
    /// Average pairwise genome distance (diversity of the population).
    pub genome_divergence: f64,
    /// Mean of gene 9 across the population.
    pub mean_sensing_radius: f64,
}

impl GenerationReport {
    pub fn measure(generation: u32, ticks: Tick, hits: u64, agents: &[Agent]) -> Self {
        let fitness: Vec<f64> = agents.iter().map(|a| a.fitness()).collect();
        let genomes: Vec<Genome> = agents.iter().map(|a| *a.genome()).collect();
        Self {
            generation,
            ticks,
            best_fitness: fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_fitness: mean(&fitness),
            worst_fitness: fitness.iter().copied().fold(f64::INFINITY, f64::min),
            hits,
            genome_divergence: genome_divergence(&genomes),
            mean_sensing_radius: mean(
                &genomes.iter().map(|g| g.sensing_radius()).collect::<Vec<_>>(),
            ),
        }
    }
}

/// Average pairwise distance between all genomes.
pub fn genome_divergence(genomes: &[Genome]) -> f64 {
    let n = genomes.len();
    if n < 2 {
        return 0.0;
    }

    let mut total_distance = 0.0;
    let mut pairs = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            total_distance += genomes[i].distance(&genomes[j]);
            pairs += 1;
        }
    }
    total_distance / pairs as f64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
