//! Error taxonomy at the analytics boundary.
//!
//! All expected failures cross the boundary as tagged values of
//! [`AnalyticsError`]; the surrounding collaborator decides how to
//! surface them. Unexpected internal failures are folded into the
//! `Internal` variant at the entry points so a single bad record cannot
//! take down a whole request.

use thiserror::Error;

use govcurve_bonds::BondError;
use govcurve_curves::CurveError;

/// A specialized Result type for analytics boundary operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// The error type returned by the public analytics entry points.
#[derive(Error, Debug, Clone)]
pub enum AnalyticsError {
    /// The requested security or its price quote does not exist.
    #[error("Not found: no security and price records for {cusip}")]
    NotFound {
        /// The identifier that was requested.
        cusip: String,
    },

    /// No security qualifies for curve calibration.
    #[error("Empty universe: no coupon-bearing securities available for calibration")]
    EmptyUniverse,

    /// An unexpected internal failure, reported generically.
    #[error("Internal analytics error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl AnalyticsError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(cusip: impl Into<String>) -> Self {
        Self::NotFound {
            cusip: cusip.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<CurveError> for AnalyticsError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::EmptyUniverse => AnalyticsError::EmptyUniverse,
            other => AnalyticsError::internal(other.to_string()),
        }
    }
}

impl From<BondError> for AnalyticsError {
    fn from(err: BondError) -> Self {
        AnalyticsError::internal(err.to_string())
    }
}
