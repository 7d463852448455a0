//! # govcurve Curves
//!
//! The Nelson-Siegel-Svensson (NSS) spot-rate model and its calibration
//! against a universe of coupon-bearing government securities.
//!
//! - [`Svensson`]: six-parameter parametric spot curve with continuous
//!   compounding discount factors
//! - [`CurveCalibrator`]: builds the sum-of-squared dirty-price loss over
//!   a bond universe and drives the derivative-free minimizer, with the
//!   decay constants reparameterized in log space so the optimizer's
//!   unconstrained search always maps to a valid curve

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod calibration;
pub mod error;
pub mod svensson;

pub use calibration::{BondObservation, Calibration, CalibratorConfig, CurveCalibrator};
pub use error::{CurveError, CurveResult};
pub use svensson::{Svensson, SvenssonParameters};
