//! NSS curve calibration against a bond universe.
//!
//! The calibrator minimizes the sum of squared dirty-price errors across
//! a universe of coupon-bearing bonds. The optimizer searches an
//! unconstrained 6-vector `(β₀, β₁, β₂, β₃, ln τ₁, ln τ₂)`; the decay
//! constants are exponentiated inside the loss, so every point the
//! simplex visits maps to a curve with strictly positive taus.
//!
//! Calibration is a pure function of its inputs: each call builds its own
//! loss closure and optimizer run, and the fixed initial guess makes
//! repeated runs on an unchanged universe bitwise-deterministic. The
//! objective is non-convex; the result is a local minimum and callers
//! must not assume global optimality.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use govcurve_core::Cashflow;
use govcurve_math::{nelder_mead, OptimizerConfig};

use crate::error::{CurveError, CurveResult};
use crate::svensson::{Svensson, SvenssonParameters};

/// One bond's contribution to the calibration loss: its future cashflows
/// relative to the curve date, paired with its observed dirty price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondObservation {
    /// Security identifier, carried for diagnostics.
    pub cusip: String,
    /// Observed dirty price per 100 face value.
    pub dirty_price: f64,
    /// Future cashflows relative to the curve/valuation date.
    pub cashflows: Vec<Cashflow>,
}

/// Configuration for curve calibration.
#[derive(Debug, Clone, Copy)]
pub struct CalibratorConfig {
    /// Optimizer iteration budget and tolerance.
    pub optimizer: OptimizerConfig,
    /// Starting point for the parameter search.
    ///
    /// The default is a plausible upward-sloping curve shape, not derived
    /// from data. It is part of the calibration's reproducibility
    /// contract: the simplex search is local, so a different start can
    /// settle in a different minimum.
    pub initial_guess: SvenssonParameters,
}

impl Default for CalibratorConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig::default(),
            initial_guess: SvenssonParameters {
                beta0: 0.04,
                beta1: -0.02,
                beta2: 0.02,
                beta3: 0.01,
                tau1: 1.0,
                tau2: 3.0,
            },
        }
    }
}

impl CalibratorConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optimizer configuration.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets the initial parameter guess.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: SvenssonParameters) -> Self {
        self.initial_guess = guess;
        self
    }
}

/// Result of a curve calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calibration {
    /// Fitted curve parameters.
    pub parameters: SvenssonParameters,
    /// Sum of squared dirty-price errors at the fitted parameters.
    pub sum_squared_error: f64,
    /// Number of bonds in the fitted universe.
    pub bonds_used: usize,
    /// Optimizer iterations used.
    pub iterations: u32,
    /// Whether the optimizer met its tolerance within the budget.
    /// Non-convergence is diagnostic, not an error.
    pub converged: bool,
}

impl Calibration {
    /// Root-mean-squared pricing error across the universe.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        if self.bonds_used == 0 {
            return 0.0;
        }
        (self.sum_squared_error / self.bonds_used as f64).sqrt()
    }

    /// One-line diagnostic summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Calibration {}: {} bonds, {} iterations, SSE={:.6e}, RMSE={:.6e}",
            if self.converged { "converged" } else { "hit budget" },
            self.bonds_used,
            self.iterations,
            self.sum_squared_error,
            self.rmse()
        )
    }
}

/// Calibrates a [`Svensson`] curve to a universe of bond observations.
#[derive(Debug, Clone, Default)]
pub struct CurveCalibrator {
    config: CalibratorConfig,
}

impl CurveCalibrator {
    /// Creates a calibrator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calibrator with custom configuration.
    #[must_use]
    pub fn with_config(config: CalibratorConfig) -> Self {
        Self { config }
    }

    /// Fits the curve to the given observations.
    ///
    /// Observations with no future cashflows are skipped with a warning;
    /// a security priced after its last coupon opportunity contributes
    /// nothing to the loss.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyUniverse` if no observation has usable
    /// cashflows, or `CurveError::InvalidParameter` if the configured
    /// initial guess has non-positive decay constants.
    pub fn fit(&self, observations: &[BondObservation]) -> CurveResult<Calibration> {
        let universe: Vec<&BondObservation> = observations
            .iter()
            .filter(|obs| {
                if obs.cashflows.is_empty() {
                    warn!("skipping {}: no future cashflows", obs.cusip);
                    false
                } else {
                    true
                }
            })
            .collect();

        if universe.is_empty() {
            return Err(CurveError::EmptyUniverse);
        }

        let guess = self.config.initial_guess;
        if guess.tau1 <= 0.0 || guess.tau2 <= 0.0 {
            return Err(CurveError::invalid_parameter(format!(
                "initial guess requires positive taus, got tau1={}, tau2={}",
                guess.tau1, guess.tau2
            )));
        }

        let initial = [
            guess.beta0,
            guess.beta1,
            guess.beta2,
            guess.beta3,
            guess.tau1.ln(),
            guess.tau2.ln(),
        ];

        let loss = |x: &[f64]| match curve_from_search_point(x) {
            Ok(curve) => universe
                .iter()
                .map(|obs| {
                    let error = obs.dirty_price - curve.present_value(&obs.cashflows);
                    error * error
                })
                .sum(),
            // Out-of-domain points (tau overflow to infinity) are repelled
            // rather than rejected.
            Err(_) => f64::INFINITY,
        };

        let result = nelder_mead(loss, &initial, &self.config.optimizer)
            .map_err(|e| CurveError::calibration_failed(e.to_string()))?;

        let fitted = curve_from_search_point(&result.parameters)?;
        let calibration = Calibration {
            parameters: fitted.parameters(),
            sum_squared_error: result.objective_value,
            bonds_used: universe.len(),
            iterations: result.iterations,
            converged: result.converged,
        };
        debug!("{}", calibration.summary());

        Ok(calibration)
    }
}

/// Maps the optimizer's unconstrained 6-vector to a curve, exponentiating
/// the log-tau coordinates.
fn curve_from_search_point(x: &[f64]) -> CurveResult<Svensson> {
    Svensson::new(x[0], x[1], x[2], x[3], x[4].exp(), x[5].exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use govcurve_core::Date;

    /// Builds an observation whose dirty price is exact under a flat
    /// continuously-compounded curve at `rate`.
    fn synthetic_bond(
        cusip: &str,
        valuation: Date,
        coupon_dates: &[(i32, u32, u32)],
        rate: f64,
    ) -> BondObservation {
        let mut cashflows: Vec<Cashflow> = coupon_dates
            .iter()
            .map(|&(y, m, d)| Cashflow::new(valuation, Date::from_ymd(y, m, d).unwrap(), 2.5))
            .collect();
        if let Some(last) = cashflows.last_mut() {
            last.amount += 100.0;
        }

        let dirty_price = cashflows
            .iter()
            .map(|cf| cf.amount * (-rate * cf.t_years).exp())
            .sum();

        BondObservation {
            cusip: cusip.to_string(),
            dirty_price,
            cashflows,
        }
    }

    fn flat_universe(valuation: Date) -> Vec<BondObservation> {
        vec![
            synthetic_bond(
                "SYNTH2Y",
                valuation,
                &[
                    (2025, 7, 15),
                    (2026, 1, 15),
                    (2026, 7, 15),
                    (2027, 1, 15),
                ],
                0.05,
            ),
            synthetic_bond(
                "SYNTH5Y",
                valuation,
                &[
                    (2025, 7, 15),
                    (2026, 1, 15),
                    (2026, 7, 15),
                    (2027, 1, 15),
                    (2027, 7, 15),
                    (2028, 1, 15),
                    (2028, 7, 15),
                    (2029, 1, 15),
                    (2029, 7, 15),
                    (2030, 1, 15),
                ],
                0.05,
            ),
        ]
    }

    #[test]
    fn test_empty_universe() {
        let calibrator = CurveCalibrator::new();
        let result = calibrator.fit(&[]);
        assert!(matches!(result, Err(CurveError::EmptyUniverse)));
    }

    #[test]
    fn test_universe_of_empty_schedules() {
        let calibrator = CurveCalibrator::new();
        let matured = BondObservation {
            cusip: "MATURED".to_string(),
            dirty_price: 100.0,
            cashflows: vec![],
        };
        let result = calibrator.fit(&[matured]);
        assert!(matches!(result, Err(CurveError::EmptyUniverse)));
    }

    #[test]
    fn test_flat_curve_recovery() {
        // A universe priced off a flat 5% curve is exactly representable
        // (β₀ = 0.05, other betas 0), so the fit should drive the loss to
        // roughly zero and recover the level.
        let valuation = Date::from_ymd(2025, 1, 15).unwrap();
        let calibrator = CurveCalibrator::new();
        let calibration = calibrator.fit(&flat_universe(valuation)).unwrap();

        assert_eq!(calibration.bonds_used, 2);
        assert!(calibration.sum_squared_error < 1e-3);
        assert_relative_eq!(calibration.parameters.beta0, 0.05, epsilon = 5e-3);
        assert!(calibration.parameters.tau1 > 0.0);
        assert!(calibration.parameters.tau2 > 0.0);
    }

    #[test]
    fn test_calibration_deterministic() {
        let valuation = Date::from_ymd(2025, 1, 15).unwrap();
        let universe = flat_universe(valuation);
        let calibrator = CurveCalibrator::new();

        let a = calibrator.fit(&universe).unwrap();
        let b = calibrator.fit(&universe).unwrap();

        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.sum_squared_error.to_bits(), b.sum_squared_error.to_bits());
    }

    #[test]
    fn test_taus_always_positive() {
        // Even a deliberately hostile start in log-tau space maps back to
        // positive decay constants.
        let valuation = Date::from_ymd(2025, 1, 15).unwrap();
        let config = CalibratorConfig::new().with_initial_guess(SvenssonParameters {
            beta0: 0.04,
            beta1: -0.02,
            beta2: 0.02,
            beta3: 0.01,
            tau1: 1e-6,
            tau2: 1e6,
        });
        let calibrator = CurveCalibrator::with_config(config);
        let calibration = calibrator.fit(&flat_universe(valuation)).unwrap();

        assert!(calibration.parameters.tau1 > 0.0);
        assert!(calibration.parameters.tau2 > 0.0);
    }

    #[test]
    fn test_invalid_initial_guess() {
        let config = CalibratorConfig::new().with_initial_guess(SvenssonParameters {
            beta0: 0.04,
            beta1: 0.0,
            beta2: 0.0,
            beta3: 0.0,
            tau1: -1.0,
            tau2: 3.0,
        });
        let calibrator = CurveCalibrator::with_config(config);
        let valuation = Date::from_ymd(2025, 1, 15).unwrap();
        assert!(calibrator.fit(&flat_universe(valuation)).is_err());
    }

    #[test]
    fn test_iteration_budget_is_best_effort() {
        let valuation = Date::from_ymd(2025, 1, 15).unwrap();
        let config = CalibratorConfig::new()
            .with_optimizer(OptimizerConfig::new().with_max_iterations(5));
        let calibrator = CurveCalibrator::with_config(config);

        let calibration = calibrator.fit(&flat_universe(valuation)).unwrap();
        assert!(!calibration.converged);
        assert_eq!(calibration.iterations, 5);
        assert!(calibration.sum_squared_error.is_finite());
    }

    #[test]
    fn test_rmse() {
        let calibration = Calibration {
            parameters: SvenssonParameters {
                beta0: 0.05,
                beta1: 0.0,
                beta2: 0.0,
                beta3: 0.0,
                tau1: 1.0,
                tau2: 3.0,
            },
            sum_squared_error: 8.0,
            bonds_used: 2,
            iterations: 10,
            converged: true,
        };
        assert_relative_eq!(calibration.rmse(), 2.0);
    }
}
