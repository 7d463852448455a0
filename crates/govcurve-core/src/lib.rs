//! # govcurve Core
//!
//! Core types for the govcurve government bond analytics workspace.
//!
//! This crate provides the foundational building blocks used throughout
//! govcurve:
//!
//! - **Date**: calendar arithmetic with end-of-month-aware month stepping
//!   and weekend-aware business day computation
//! - **Frequency**: coupon payment frequency plus the classification rules
//!   that derive it from security master text fields
//! - **SecurityMaster / PriceQuote**: the read-only record shapes consumed
//!   from the external data provider
//! - **Cashflow**: a dated payment with its time coordinate on the curve axis
//!
//! ## Calendar assumptions
//!
//! Business day logic is weekend-only: no holiday calendar is consulted.
//! Year fractions use a fixed 365.25-day year applied to calendar-day
//! differences, so the coupon schedule and the curve time axis share one
//! clock. Both are deliberate simplifications of market conventions and
//! are relied upon by downstream pricing and calibration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Cashflow, Date, Frequency, PriceQuote, SecurityMaster, DAYS_PER_YEAR};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Cashflow, Date, Frequency, PriceQuote, SecurityMaster, DAYS_PER_YEAR};
