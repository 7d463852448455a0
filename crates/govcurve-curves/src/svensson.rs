//! Nelson-Siegel-Svensson parametric spot curve.

use serde::{Deserialize, Serialize};

use govcurve_core::Cashflow;

use crate::error::{CurveError, CurveResult};

/// Svensson (NSS) spot-rate curve.
///
/// The model parameterizes the annualized spot rate as:
/// ```text
/// z(t) = β₀ + β₁ * ((1 - e^(-t/τ₁)) / (t/τ₁))
///           + β₂ * ((1 - e^(-t/τ₁)) / (t/τ₁) - e^(-t/τ₁))
///           + β₃ * ((1 - e^(-t/τ₂)) / (t/τ₂) - e^(-t/τ₂))
/// ```
///
/// Where:
/// - β₀: Long-term level (asymptotic spot rate)
/// - β₁: Short-term component (slope)
/// - β₂: First hump component (curvature)
/// - β₃: Second hump component
/// - τ₁, τ₂: Decay-time constants, strictly positive
///
/// At `t <= 0` the curve returns β₀. This pins the value at the valuation
/// date itself and avoids the 0/0 in the loading factors; it is the limit
/// the rest of the workspace is calibrated against, so it must not be
/// changed to the textbook β₀ + β₁ short-end limit.
///
/// # Example
///
/// ```rust
/// use govcurve_curves::Svensson;
///
/// let curve = Svensson::new(0.045, -0.02, 0.01, -0.005, 2.0, 8.0).unwrap();
/// let short = curve.spot_rate(0.25);
/// let long = curve.spot_rate(30.0);
/// assert!(short < long);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svensson {
    /// Long-term level
    beta0: f64,
    /// Short-term component
    beta1: f64,
    /// First hump component
    beta2: f64,
    /// Second hump component
    beta3: f64,
    /// First decay-time constant
    tau1: f64,
    /// Second decay-time constant
    tau2: f64,
}

impl Svensson {
    /// Creates a new Svensson curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidParameter` if either tau is not
    /// strictly positive or any parameter is non-finite.
    pub fn new(
        beta0: f64,
        beta1: f64,
        beta2: f64,
        beta3: f64,
        tau1: f64,
        tau2: f64,
    ) -> CurveResult<Self> {
        if tau1 <= 0.0 {
            return Err(CurveError::invalid_parameter(format!(
                "tau1 must be positive, got {tau1}"
            )));
        }
        if tau2 <= 0.0 {
            return Err(CurveError::invalid_parameter(format!(
                "tau2 must be positive, got {tau2}"
            )));
        }
        let all = [beta0, beta1, beta2, beta3, tau1, tau2];
        if all.iter().any(|p| !p.is_finite()) {
            return Err(CurveError::invalid_parameter(
                "parameters must be finite".to_string(),
            ));
        }

        Ok(Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        })
    }

    /// Returns the annualized spot rate at time `t` (in years).
    ///
    /// `t <= 0` returns β₀.
    #[must_use]
    pub fn spot_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0;
        }

        let x1 = t / self.tau1;
        let x2 = t / self.tau2;

        self.beta0
            + self.beta1 * loading_factor_1(x1)
            + self.beta2 * loading_factor_2(x1)
            + self.beta3 * loading_factor_2(x2)
    }

    /// Returns the continuous-compounding discount factor at time `t`.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.spot_rate(t) * t).exp()
    }

    /// Present value of a cashflow sequence under this curve.
    #[must_use]
    pub fn present_value(&self, cashflows: &[Cashflow]) -> f64 {
        cashflows
            .iter()
            .map(|cf| cf.amount * self.discount_factor(cf.t_years))
            .sum()
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> SvenssonParameters {
        SvenssonParameters {
            beta0: self.beta0,
            beta1: self.beta1,
            beta2: self.beta2,
            beta3: self.beta3,
            tau1: self.tau1,
            tau2: self.tau2,
        }
    }
}

/// Plain parameter record for a [`Svensson`] curve.
///
/// One set is valid for a single valuation/curve date. Serializable for
/// reporting; convert back to a model with [`SvenssonParameters::model`],
/// which re-validates the decay constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvenssonParameters {
    /// Long-term level.
    pub beta0: f64,
    /// Short-term component.
    pub beta1: f64,
    /// First hump component.
    pub beta2: f64,
    /// Second hump component.
    pub beta3: f64,
    /// First decay-time constant.
    pub tau1: f64,
    /// Second decay-time constant.
    pub tau2: f64,
}

impl SvenssonParameters {
    /// Builds the validated curve model from this record.
    pub fn model(&self) -> CurveResult<Svensson> {
        Svensson::new(
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        )
    }
}

/// Helper function: (1 - e^(-x)) / x
fn loading_factor_1(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0 - x / 2.0 + x * x / 6.0 // Taylor expansion for numerical stability
    } else {
        (1.0 - (-x).exp()) / x
    }
}

/// Helper function: (1 - e^(-x)) / x - e^(-x)
fn loading_factor_2(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        x / 2.0 - x * x / 3.0
    } else {
        loading_factor_1(x) - (-x).exp()
    }
}
