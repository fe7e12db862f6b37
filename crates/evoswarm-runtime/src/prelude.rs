//! evoswarm Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use evoswarm_runtime::prelude::*;
//! ```

// Re-export simulation
pub use crate::simulation::{Simulation, SimulationStats, SimulationSnapshot, AgentSnapshot};

// Re-export configuration
pub use crate::config::{SimulationConfig, validate_canvas};

// Re-export genetic operator
pub use crate::evolution::{evolve, rank_by_fitness};

// Re-export metrics
pub use crate::metrics::{GenerationReport, genome_divergence};

pub use crate::error::RuntimeError;
pub use crate::rng::create_rng;

// Re-export from core
pub use evoswarm_core::prelude::*;
