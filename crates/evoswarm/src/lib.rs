//! # evoswarm
//!
//! A continuous, real-time genetic algorithm running alongside a simple
//! physics loop. Point agents move on a wrap-around plane, each steered
//! by a twelve-gene genome. Surviving a tick earns fitness, overlapping
//! another agent costs it, and every generation the population's genomes
//! are recombined and mutated in place.
//!
//! ## Quick Start
//!
//! ```rust
//! use evoswarm::prelude::*;
//!
//! let config = SimulationConfig::default()
//!     .with_seed(42)
//!     .with_generation_length(100);
//! let mut sim = Simulation::new(config, 800.0, 600.0).expect("valid config");
//!
//! // The host calls advance once per frame with the current canvas size.
//! for _ in 0..250 {
//!     sim.advance(800.0, 600.0);
//! }
//!
//! assert_eq!(sim.generation(), 2);
//! for agent in sim.agents() {
//!     let _draw = (agent.position(), agent.radius(), agent.state().color());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`evoswarm_core`] - Vectors, genomes, and the agent steering rules
//! - [`evoswarm_runtime`] - Simulation loop, genetic operator, metrics
//!
//! ## Genome layout
//!
//! | Genes | Role |
//! |-------|------|
//! | 0–3 | Lone steering: acceleration and velocity weights |
//! | 4–7 | Flock steering: own and neighbor heading weights |
//! | 8 | Flock steering distance gain |
//! | 9 | Sensing radius |
//! | 10–11 | Reserved |

pub use evoswarm_core;
pub use evoswarm_runtime;

pub mod prelude {
    pub use evoswarm_runtime::prelude::*;
}
