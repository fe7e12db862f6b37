//! Error types for core evoswarm operations.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by vectors, genomes and agents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Attempted to normalize a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// A genome was built from the wrong number of genes.
    #[error("invalid genome length: expected {expected}, found {found}")]
    InvalidGenomeLength { expected: usize, found: usize },
}
