//! Agent genome — the twelve evolvable steering weights.
//!
//! Genes 0–3 weight the lone-steering rule, genes 4–8 the flock-steering
//! rule, gene 9 is the sensing radius. Genes 10 and 11 carry no behavior
//! yet but are inherited and mutated like the rest, so the genome keeps a
//! fixed length of [`GENOME_LEN`].

use crate::error::{CoreError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes in every genome.
pub const GENOME_LEN: usize = 12;

/// Gene holding the sensing radius.
pub const SENSING_RADIUS_GENE: usize = 9;

/// Fixed value of the flock-steering genes (4–8) in a founder genome.
const FOUNDER_FLOCK_WEIGHT: f64 = 1.0;

/// Crossover and mutation settings used by [`Genome::reproduce`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReproductionParams {
    /// Per-gene probability of taking the other parent's value.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Per-gene probability of a random perturbation.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Perturbations are uniform in `[-mutation_amplitude, +mutation_amplitude]`.
    #[serde(default = "default_mutation_amplitude")]
    pub mutation_amplitude: f64,
}

fn default_crossover_rate() -> f64 { 0.5 }
fn default_mutation_rate() -> f64 { 0.1 }
fn default_mutation_amplitude() -> f64 { 1.0 }

impl Default for ReproductionParams {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            mutation_amplitude: default_mutation_amplitude(),
        }
    }
}

/// Evolvable steering parameters for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genome([f64; GENOME_LEN]);

impl Genome {
    /// Build a genome from exactly [`GENOME_LEN`] genes.
    ///
    /// Any other length is a configuration error; values are never padded
    /// or truncated.
    pub fn from_slice(genes: &[f64]) -> Result<Self> {
        let genes: [f64; GENOME_LEN] =
            genes.try_into().map_err(|_| CoreError::InvalidGenomeLength {
                expected: GENOME_LEN,
                found: genes.len(),
            })?;
        Ok(Self(genes))
    }

    /// Founder genome: random lone-steering weights in `[-1, 1)`, fixed
    /// values everywhere else.
    pub fn founder<R: Rng + ?Sized>(rng: &mut R, sensing_radius: f64) -> Self {
        let mut genes = [0.0; GENOME_LEN];
        for gene in genes.iter_mut().take(4) {
            *gene = rng.random_range(-1.0..1.0);
        }
        for gene in &mut genes[4..=8] {
            *gene = FOUNDER_FLOCK_WEIGHT;
        }
        genes[SENSING_RADIUS_GENE] = sensing_radius;
        Self(genes)
    }

    pub fn genes(&self) -> &[f64; GENOME_LEN] {
        &self.0
    }

    /// Gene `index`. Panics when `index >= GENOME_LEN`, like slice indexing.
    pub fn gene(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn set_gene(&mut self, index: usize, value: f64) {
        self.0[index] = value;
    }

    pub fn sensing_radius(&self) -> f64 {
        self.0[SENSING_RADIUS_GENE]
    }

    /// Per-gene crossover with `other`, then mutation.
    ///
    /// The two draws are independent: a gene can be both inherited from
    /// `other` and perturbed.
    pub fn reproduce<R: Rng + ?Sized>(
        &mut self,
        other: &Genome,
        params: &ReproductionParams,
        rng: &mut R,
    ) {
        for (gene, donor) in self.0.iter_mut().zip(other.0.iter()) {
            if rng.random::<f64>() < params.crossover_rate {
                *gene = *donor;
            }
            if rng.random::<f64>() < params.mutation_rate && params.mutation_amplitude > 0.0 {
                *gene += rng.random_range(-params.mutation_amplitude..=params.mutation_amplitude);
            }
        }
    }

    /// Euclidean distance between two genomes in gene space.
    pub fn distance(&self, other: &Genome) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl TryFrom<Vec<f64>> for Genome {
    type Error = CoreError;

    fn try_from(genes: Vec<f64>) -> Result<Self> {
        Genome::from_slice(&genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn ones() -> Genome {
        Genome::from_slice(&[1.0; GENOME_LEN]).unwrap()
    }

    fn zeros() -> Genome {
        Genome::from_slice(&[0.0; GENOME_LEN]).unwrap()
    }

    #[test]
    fn wrong_length_fails_fast() {
        let err = Genome::from_slice(&[0.0; 11]).unwrap_err();
        assert_eq!(err, CoreError::InvalidGenomeLength { expected: 12, found: 11 });
        assert!(Genome::try_from(vec![0.0; 13]).is_err());
        assert!(Genome::try_from(Vec::new()).is_err());
    }

    #[test]
    fn founder_layout() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let g = Genome::founder(&mut rng, 30.0);
        for i in 0..4 {
            assert!((-1.0..1.0).contains(&g.gene(i)));
        }
        for i in 4..=8 {
            assert_eq!(g.gene(i), 1.0);
        }
        assert_eq!(g.sensing_radius(), 30.0);
        assert_eq!(g.gene(10), 0.0);
        assert_eq!(g.gene(11), 0.0);
    }

    #[test]
    fn full_crossover_without_mutation_copies_donor() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let params = ReproductionParams {
            crossover_rate: 1.0,
            mutation_rate: 0.0,
            mutation_amplitude: 1.0,
        };
        let mut child = zeros();
        child.reproduce(&ones(), &params, &mut rng);
        assert_eq!(child, ones());
    }

    #[test]
    fn no_crossover_no_mutation_keeps_own_genes() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let params = ReproductionParams {
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            mutation_amplitude: 1.0,
        };
        let mut child = zeros();
        child.reproduce(&ones(), &params, &mut rng);
        assert_eq!(child, zeros());
    }

    #[test]
    fn mutation_stays_within_amplitude() {
        let params = ReproductionParams {
            crossover_rate: 0.0,
            mutation_rate: 1.0,
            mutation_amplitude: 1.0,
        };
        for seed in 0..50 {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let mut child = zeros();
            child.reproduce(&zeros(), &params, &mut rng);
            assert!(child.genes().iter().all(|g| (-1.0..=1.0).contains(g)));
            assert_ne!(child, zeros());
        }
    }

    #[test]
    fn default_rates_mix_both_parents() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let params = ReproductionParams {
            mutation_rate: 0.0,
            ..ReproductionParams::default()
        };
        let mut inherited = 0;
        for _ in 0..200 {
            let mut child = zeros();
            child.reproduce(&ones(), &params, &mut rng);
            inherited += child.genes().iter().filter(|g| **g == 1.0).count();
        }
        // 2400 coin flips at p = 0.5
        assert!((1000..1400).contains(&inherited), "inherited {}", inherited);
    }

    #[test]
    fn reproduce_is_deterministic_under_seed() {
        let params = ReproductionParams::default();
        let run = |seed| {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let mut child = zeros();
            child.reproduce(&ones(), &params, &mut rng);
            child
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn distance_between_genomes() {
        assert_eq!(ones().distance(&ones()), 0.0);
        assert!((zeros().distance(&ones()) - (GENOME_LEN as f64).sqrt()).abs() < 1e-12);
    }
}
