//! Error types for bond analytics.

use thiserror::Error;

use govcurve_core::CoreError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// The error type for bond operations.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// The schedule inputs cannot produce a valid coupon grid.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// Description of the schedule problem.
        message: String,
    },

    /// A security master field violates what the operation requires.
    #[error("Invalid security input: {reason}")]
    InvalidInput {
        /// Description of what's invalid.
        reason: String,
    },

    /// A date computation failed.
    #[error(transparent)]
    Date(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(message: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BondError::invalid_schedule("periods per year must be positive");
        assert!(err.to_string().contains("Invalid schedule"));
    }
}
