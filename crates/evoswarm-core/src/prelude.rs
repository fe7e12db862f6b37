//! evoswarm Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use evoswarm_core::prelude::*;
//! ```

pub use crate::types::{
    AgentId, Vector2, Rgb, DisplayState, Tick,
    wrap_coordinate,
};

pub use crate::genome::{Genome, ReproductionParams, GENOME_LEN, SENSING_RADIUS_GENE};

pub use crate::agent::{Agent, Presence, NeighborReading};

pub use crate::error::{CoreError, Result};
