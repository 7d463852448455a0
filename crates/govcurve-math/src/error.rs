//! Error types for math operations.

use thiserror::Error;

/// A specialized Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// The error type for math operations.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// Invalid input to a numerical routine.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input.
        message: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
