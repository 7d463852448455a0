//! # govcurve Math
//!
//! Numerical routines for the govcurve analytics workspace.
//!
//! Currently this is the derivative-free simplex minimizer used by curve
//! calibration. It is a standalone component parameterized over the
//! objective closure, so it can be exercised with textbook benchmark
//! functions independent of any pricing code.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod nelder_mead;

pub use error::{MathError, MathResult};
pub use nelder_mead::{nelder_mead, OptimizationResult, OptimizerConfig};
