//! Shared types used across the evoswarm crates.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use uuid::Uuid;

/// Monotonic tick counter.
pub type Tick = u64;

/// Unique identifier for an agent in the population.
///
/// Identities persist for the whole run; only genomes are rewritten
/// between generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic ID, so seeded runs produce identical snapshots.
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(0, seed))
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// A point or displacement on the simulated plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `self + other`, leaving both operands untouched.
    pub fn plus(&self, other: &Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    /// `k · self`.
    pub fn scaled(&self, k: f64) -> Vector2 {
        Vector2::new(self.x * k, self.y * k)
    }

    /// Add `other` in place. Used for position integration.
    pub fn add(&mut self, other: &Vector2) {
        self.x += other.x;
        self.y += other.y;
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance_to(&self, other: &Vector2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Unit vector pointing the same way.
    ///
    /// Fails with [`CoreError::DegenerateVector`] when the length is zero
    /// (or not finite), since there is no direction to preserve.
    pub fn normalize(&self) -> Result<Vector2> {
        let len = self.magnitude();
        if len == 0.0 || !len.is_finite() {
            return Err(CoreError::DegenerateVector);
        }
        Ok(Vector2::new(self.x / len, self.y / len))
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.add(&rhs);
    }
}

/// Wrap a coordinate onto `[0, extent)`.
///
/// Works for any overshoot, not just a single crossing of the edge.
/// A non-positive extent collapses the axis to 0.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !extent.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Colour triple handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Presentation tag derived from the last proximity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayState {
    /// No overlap detected this tick.
    #[default]
    Initial,
    /// Physically overlapping another agent this tick.
    Hit,
}

impl DisplayState {
    pub fn color(&self) -> Rgb {
        match self {
            DisplayState::Initial => Rgb(255, 255, 255),
            DisplayState::Hit => Rgb(255, 0, 0),
        }
    }
}
