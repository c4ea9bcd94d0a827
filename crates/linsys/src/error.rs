//! Error types for linsys

use thiserror::Error;

/// Result type for vector, hyperplane and linear system operations
pub type Result<T> = std::result::Result<T, LinSysError>;

/// Errors that can occur while building or reducing a linear system
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinSysError {
    /// Malformed coordinate sequence
    #[error("Invalid vector: {message}")]
    InvalidVector {
        /// What was wrong with the coordinates
        message: String,
    },

    /// A value could not be converted to an exact scalar
    #[error("Invalid scalar literal: {literal:?}")]
    InvalidScalar {
        /// The offending input, as text
        literal: String,
    },

    /// Near-zero tolerance that is not strictly positive
    #[error("Tolerance must be positive, got {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance, as text
        tolerance: String,
    },

    /// Operation undefined on the zero vector
    #[error("Cannot {operation} with the zero vector")]
    ZeroVector {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// Pivot search found no coefficient above the near-zero tolerance
    #[error("No nonzero elements found")]
    NoNonzeroElements,

    /// Dimension disagreement between vectors, rows or a system
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension required by the receiver
        expected: usize,
        /// The dimension that was supplied
        actual: usize,
    },

    /// Row index outside the system
    #[error("Row {row} is out of bounds for a system with {nrows} rows")]
    RowOutOfBounds {
        /// The requested row
        row: usize,
        /// Number of rows in the system
        nrows: usize,
    },

    /// A linear system needs at least one row
    #[error("A linear system needs at least one hyperplane")]
    EmptySystem,

    /// Scaling a row by zero would discard the equation
    #[error("Cannot multiply row {row} by zero")]
    ZeroScalar {
        /// The row that was to be scaled
        row: usize,
    },

    /// Operation only defined for particular dimensions
    #[error("{operation} is not defined in dimension {dimension}")]
    UnsupportedDimension {
        /// The operation that was attempted
        operation: &'static str,
        /// The dimension of the operands
        dimension: usize,
    },
}

impl LinSysError {
    pub(crate) fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        LinSysError::DimensionMismatch { expected, actual }
    }
}
