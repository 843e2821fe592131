//! Error types for TourForge

use thiserror::Error;

/// Main error type for TourForge operations.
///
/// Construction errors carry enough context (offending position, value and
/// bound) to point at the exact entry that made the input invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourForgeError {
    /// A sequence does not have the length its container requires.
    #[error("Invalid {what} because of mismatched length: expect {expected} got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An entry exceeds the largest admissible value.
    #[error(
        "Invalid {what} because at position {position}, the {entry} is {value}, which exceeds {max}"
    )]
    OutOfRange {
        what: &'static str,
        entry: &'static str,
        position: usize,
        value: usize,
        max: usize,
    },

    /// An entry that must be unique occurs more than once.
    #[error(
        "Invalid {what} because {entry} {value} appears at least twice (at {what} positions {first} and {second})"
    )]
    Duplicate {
        what: &'static str,
        entry: &'static str,
        value: usize,
        first: usize,
        second: usize,
    },

    /// A constructor or solver received an argument it cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was called while its precondition does not hold.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TourForgeError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result type alias for TourForge operations
pub type Result<T> = std::result::Result<T, TourForgeError>;
