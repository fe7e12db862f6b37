//! # evoswarm Core
//!
//! Core types for evoswarm: a population of point agents, each steered
//! by a twelve-gene genome, moving on a wrap-around plane.
//!
//! - [`types`] — [`Vector2`](types::Vector2), agent IDs, display states
//!   and the toroidal wrap
//! - [`genome`] — the fixed-length genome with crossover and mutation
//! - [`agent`] — steering, movement, proximity detection and fitness
//!
//! ## Quick Start
//!
//! ```rust
//! use evoswarm_core::prelude::*;
//!
//! let genome = Genome::from_slice(&[0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 30.0, 0.0, 0.0])
//!     .expect("twelve genes");
//! let mut agent = Agent::new(
//!     AgentId::from_seed(0),
//!     Vector2::new(99.5, 10.0),
//!     Vector2::new(1.0, 0.0),
//!     genome,
//!     10.0,
//! );
//!
//! let view = [agent.presence()];
//! agent.update(&view, 100.0, 100.0);
//! assert!(agent.position().x < 1.0);
//! assert_eq!(agent.fitness(), 1.0);
//! ```

pub mod types;
pub mod error;
pub mod genome;
pub mod agent;
pub mod prelude;
