//! Error types for curve construction and calibration.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// The error type for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// A model parameter is outside its valid domain.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error.
        message: String,
    },

    /// No security qualifies for curve calibration.
    #[error("Empty bond universe: no coupon-bearing securities with usable cashflows")]
    EmptyUniverse,

    /// Calibration could not be run at all (distinct from non-convergence,
    /// which is reported as a diagnostic on the result).
    #[error("Calibration failed: {reason}")]
    CalibrationFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(reason: impl Into<String>) -> Self {
        Self::CalibrationFailed {
            reason: reason.into(),
        }
    }
}
