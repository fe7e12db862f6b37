//! Error types for the simulation runtime.

use thiserror::Error;

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while building a simulation.
///
/// Nothing inside a tick can fail; these only surface at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("a simulation needs at least one agent")]
    EmptyPopulation,
}

impl RuntimeError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RuntimeError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
