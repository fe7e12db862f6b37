//! Simulation configuration.

use crate::error::{Result, RuntimeError};
use evoswarm_core::genome::ReproductionParams;
use serde::{Deserialize, Serialize};

/// Tunable parameters for a simulation run.
///
/// Every field has a default, so a partial TOML or JSON document is enough
/// to override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of agents, fixed for the whole run (default: 10).
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Ticks per generation before the genetic operator runs (default: 1000).
    #[serde(default = "default_generation_length")]
    pub generation_length: u64,
    /// Physical collision radius shared by every agent (default: 10.0).
    #[serde(default = "default_collision_radius")]
    pub collision_radius: f64,
    /// Sensing radius written into gene 9 of founder genomes (default: 30.0).
    #[serde(default = "default_initial_sensing_radius")]
    pub initial_sensing_radius: f64,
    /// RNG seed. When absent a seed is drawn from entropy and recorded.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Crossover and mutation rates.
    #[serde(default)]
    pub evolution: ReproductionParams,
}

fn default_population_size() -> usize { 10 }
fn default_generation_length() -> u64 { 1000 }
fn default_collision_radius() -> f64 { 10.0 }
fn default_initial_sensing_radius() -> f64 { 30.0 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generation_length: default_generation_length(),
            collision_radius: default_collision_radius(),
            initial_sensing_radius: default_initial_sensing_radius(),
            seed: None,
            evolution: ReproductionParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generation_length(mut self, generation_length: u64) -> Self {
        self.generation_length = generation_length;
        self
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(RuntimeError::EmptyPopulation);
        }
        if self.generation_length == 0 {
            return Err(RuntimeError::invalid_config(
                "generation_length",
                "must be at least 1 tick",
            ));
        }
        if !(self.collision_radius.is_finite() && self.collision_radius > 0.0) {
            return Err(RuntimeError::invalid_config(
                "collision_radius",
                format!("{} is not a positive number", self.collision_radius),
            ));
        }
        if !self.initial_sensing_radius.is_finite() {
            return Err(RuntimeError::invalid_config(
                "initial_sensing_radius",
                format!("{} is not finite", self.initial_sensing_radius),
            ));
        }
        check_probability("evolution.crossover_rate", self.evolution.crossover_rate)?;
        check_probability("evolution.mutation_rate", self.evolution.mutation_rate)?;
        let amplitude = self.evolution.mutation_amplitude;
        if !(amplitude.is_finite() && amplitude >= 0.0) {
            return Err(RuntimeError::invalid_config(
                "evolution.mutation_amplitude",
                format!("{} is not a non-negative number", amplitude),
            ));
        }
        Ok(())
    }
}

fn check_probability(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RuntimeError::invalid_config(
            field,
            format!("{} is outside [0, 1]", value),
        ))
    }
}

/// Reject canvas extents that cannot hold a wrapped position.
pub fn validate_canvas(width: f64, height: f64) -> Result<()> {
    for (field, extent) in [("width", width), ("height", height)] {
        if !(extent.is_finite() && extent > 0.0) {
            return Err(RuntimeError::invalid_config(
                field,
                format!("{} is not a positive canvas extent", extent),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.generation_length, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"population_size": 4, "evolution": {"mutation_rate": 0.2}}"#)
                .unwrap();
        assert_eq!(config.population_size, 4);
        assert_eq!(config.generation_length, 1000);
        assert_eq!(config.evolution.mutation_rate, 0.2);
        assert_eq!(config.evolution.crossover_rate, 0.5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            SimulationConfig::default().with_population_size(0).validate(),
            Err(RuntimeError::EmptyPopulation)
        );
        assert!(SimulationConfig::default().with_generation_length(0).validate().is_err());

        let mut config = SimulationConfig::default();
        config.collision_radius = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.evolution.crossover_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.evolution.mutation_amplitude = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn canvas_must_be_positive() {
        assert!(validate_canvas(800.0, 600.0).is_ok());
        assert!(validate_canvas(0.0, 600.0).is_err());
        assert!(validate_canvas(800.0, f64::NAN).is_err());
    }
}
