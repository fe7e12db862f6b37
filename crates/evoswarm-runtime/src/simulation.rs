//! Simulation — the population and its generational clock.
//!
//! The simulation owns every agent. The host calls
//! [`advance`](Simulation::advance) once per frame with the current canvas
//! size; nothing here assumes a wall-clock interval between calls.
//!
//! Each advance:
//! 1. Every agent updates (steer, move, wrap, +1 fitness) against a frozen
//!    view of the population
//! 2. Every agent checks proximity against a fresh frozen view
//! 3. The generation clock ticks; when it reaches the generation length
//!    the genetic operator rewrites every genome and the clock restarts
//!
//! Steering in step 1 reads the neighbors found in the previous advance's
//! step 2, so agents always react to one-tick-old surroundings.

use crate::config::{validate_canvas, SimulationConfig};
use crate::error::{Result, RuntimeError};
use crate::evolution;
use crate::metrics::GenerationReport;
use crate::rng::{create_rng, fresh_seed};
use evoswarm_core::agent::{Agent, Presence};
use evoswarm_core::types::*;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Statistics about the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Ticks since the simulation started.
    pub total_ticks: Tick,
    /// Ticks into the current generation.
    pub generation_tick: Tick,
    pub generation: u32,
    pub population: usize,
    /// Agents tagged `Hit` by the last proximity pass.
    pub agents_hit: usize,
}

/// Renderable state of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Vector2,
    pub direction: Vector2,
    pub radius: f64,
    pub state: DisplayState,
    pub color: Rgb,
    pub fitness: f64,
    /// Top-ranked agent of the last completed generation.
    pub champion: bool,
}

/// A complete serializable snapshot of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub seed: u64,
    pub stats: SimulationStats,
    pub agents: Vec<AgentSnapshot>,
    pub history: Vec<GenerationReport>,
}

/// The population, its RNG and its generational clock.
pub struct Simulation {
    agents: Vec<Agent>,
    config: SimulationConfig,
    rng: ChaCha12Rng,
    seed: u64,
    generation_tick: Tick,
    total_ticks: Tick,
    generation: u32,
    hits_this_generation: u64,
    champion: Option<AgentId>,
    history: Vec<GenerationReport>,
}

impl Simulation {
    /// Create a simulation with a random founder population spread over a
    /// `width` × `height` canvas.
    pub fn new(config: SimulationConfig, width: f64, height: f64) -> Result<Self> {
        config.validate()?;
        validate_canvas(width, height)?;

        let seed = config.seed.unwrap_or_else(fresh_seed);
        let mut rng = create_rng(seed);
        let agents: Vec<Agent> = (0..config.population_size)
            .map(|i| {
                Agent::spawn(
                    AgentId::from_seed(i as u64),
                    &mut rng,
                    width,
                    height,
                    config.collision_radius,
                    config.initial_sensing_radius,
                )
            })
            .collect();

        debug!(
            seed,
            population = config.population_size,
            generation_length = config.generation_length,
            "simulation created"
        );
        Ok(Self::assemble(agents, config, rng, seed))
    }

    /// Create a simulation from hand-built agents.
    ///
    /// `population_size` in `config` is replaced by the number of agents.
    pub fn from_agents(agents: Vec<Agent>, config: SimulationConfig) -> Result<Self> {
        if agents.is_empty() {
            return Err(RuntimeError::EmptyPopulation);
        }
        let config = config.with_population_size(agents.len());
        config.validate()?;

        let seed = config.seed.unwrap_or_else(fresh_seed);
        Ok(Self::assemble(agents, config, create_rng(seed), seed))
    }

    fn assemble(agents: Vec<Agent>, config: SimulationConfig, rng: ChaCha12Rng, seed: u64) -> Self {
        Self {
            agents,
            config,
            rng,
            seed,
            generation_tick: 0,
            total_ticks: 0,
            generation: 0,
            hits_this_generation: 0,
            champion: None,
            history: Vec::new(),
        }
    }

    /// Advance the simulation by one tick on a `width` × `height` canvas.
    ///
    /// The canvas may change between calls; wrapping always uses the
    /// extents passed to this call.
    pub fn advance(&mut self, width: f64, height: f64) {
        let view = self.presences();
        for agent in self.agents.iter_mut() {
            agent.update(&view, width, height);
        }

        let view = self.presences();
        let mut hits = 0;
        for (idx, agent) in self.agents.iter_mut().enumerate() {
            if agent.detect_proximity_all(idx, &view) {
                hits += 1;
            }
        }
        self.hits_this_generation += hits;

        self.total_ticks += 1;
        self.generation_tick += 1;
        if self.generation_tick >= self.config.generation_length {
            self.end_generation();
        }
    }

    /// Run the simulation for N ticks on a fixed canvas.
    pub fn run(&mut self, ticks: u64, width: f64, height: f64) {
        for _ in 0..ticks {
            self.advance(width, height);
        }
    }

    fn presences(&self) -> Vec<Presence> {
        self.agents.iter().map(Agent::presence).collect()
    }

    fn end_generation(&mut self) {
        let report = GenerationReport::measure(
            self.generation,
            self.generation_tick,
            self.hits_this_generation,
            &self.agents,
        );
        info!(
            generation = report.generation,
            best = report.best_fitness,
            mean = report.mean_fitness,
            worst = report.worst_fitness,
            hits = report.hits,
            divergence = report.genome_divergence,
            "generation complete"
        );
        self.history.push(report);

        self.champion = evolution::evolve(&mut self.agents, &self.config.evolution, &mut self.rng);

        self.generation += 1;
        self.generation_tick = 0;
        self.hits_this_generation = 0;
    }

    /// Get simulation statistics.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            total_ticks: self.total_ticks,
            generation_tick: self.generation_tick,
            generation: self.generation,
            population: self.agents.len(),
            agents_hit: self
                .agents
                .iter()
                .filter(|a| a.state() == DisplayState::Hit)
                .count(),
        }
    }

    /// Take a serializable snapshot of the simulation's current state.
    pub fn snapshot(&self) -> SimulationSnapshot {
        let agents = self
            .agents
            .iter()
            .map(|a| AgentSnapshot {
                id: a.id(),
                position: a.position(),
                direction: a.direction(),
                radius: a.radius(),
                state: a.state(),
                color: a.state().color(),
                fitness: a.fitness(),
                champion: self.champion == Some(a.id()),
            })
            .collect();

        SimulationSnapshot {
            seed: self.seed,
            stats: self.stats(),
            agents,
            history: self.history.clone(),
        }
    }

    /// The population, in ranked order after the first generation.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the RNG was created from; replaying it reproduces the run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn total_ticks(&self) -> Tick {
        self.total_ticks
    }

    pub fn champion(&self) -> Option<AgentId> {
        self.champion
    }

    /// Reports for every completed generation, oldest first.
    pub fn history(&self) -> &[GenerationReport] {
        &self.history
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.history.last()
    }
}
