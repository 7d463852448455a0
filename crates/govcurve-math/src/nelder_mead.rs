//! Nelder-Mead simplex minimization.
//!
//! A derivative-free minimizer for scalar objectives over a real vector.
//! The driver is generic over the objective closure and never requires
//! gradients, which makes it suitable for the non-convex, reparameterized
//! curve-fitting losses it was built for.
//!
//! Termination is by iteration cap or by the objective spread across the
//! simplex falling below tolerance. The best point found is always
//! returned, even on non-convergence; convergence quality is reported via
//! the iteration count and flag, never as an error.

use log::debug;

use crate::error::{MathError, MathResult};

/// Reflection coefficient (standard simplex value).
const REFLECTION: f64 = 1.0;
/// Expansion coefficient.
const EXPANSION: f64 = 2.0;
/// Contraction coefficient.
const CONTRACTION: f64 = 0.5;
/// Shrink coefficient.
const SHRINK: f64 = 0.5;

/// Relative perturbation used to build the initial simplex.
const STEP_FRACTION: f64 = 0.05;
/// Absolute perturbation for coordinates that start at zero.
const ZERO_STEP: f64 = 0.00025;

/// Configuration for the simplex minimizer.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerConfig {
    /// Maximum number of iterations. The loop always terminates within
    /// this budget regardless of convergence.
    pub max_iterations: u32,
    /// Convergence tolerance on the objective spread across the simplex.
    pub tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            tolerance: 1e-12,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameter vector found.
    pub parameters: Vec<f64>,
    /// Objective value at the best point.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the simplex spread fell below tolerance.
    pub converged: bool,
}

/// Minimizes a scalar objective with the Nelder-Mead simplex method.
///
/// # Arguments
///
/// * `f` - Objective function over the parameter vector
/// * `initial` - Starting point; the initial simplex perturbs each
///   coordinate by 5% (or a small absolute step at zero)
/// * `config` - Iteration budget and tolerance
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if `initial` is empty. Failure to
/// converge within the budget is not an error; the best point found is
/// returned with `converged = false`.
///
/// # Example
///
/// ```rust
/// use govcurve_math::{nelder_mead, OptimizerConfig};
///
/// let f = |x: &[f64]| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2);
/// let result = nelder_mead(f, &[0.0, 0.0], &OptimizerConfig::default()).unwrap();
/// assert!(result.converged);
/// assert!((result.parameters[0] - 2.0).abs() < 1e-6);
/// ```
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    config: &OptimizerConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return Err(MathError::invalid_input(
            "initial point must have at least one coordinate",
        ));
    }

    let n = initial.len();

    // Initial simplex: the starting point plus one axis-wise perturbation
    // per coordinate.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    let value = f(initial);
    simplex.push((initial.to_vec(), value));
    for i in 0..n {
        let mut point = initial.to_vec();
        point[i] = if point[i] == 0.0 {
            ZERO_STEP
        } else {
            point[i] * (1.0 + STEP_FRACTION)
        };
        let value = f(&point);
        simplex.push((point, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        simplex.sort_by(|a, b| cmp_objective(a.1, b.1));

        let best = simplex[0].1;
        let worst = simplex[n].1;
        if (worst - best).abs() <= config.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (point, _) in &simplex[..n] {
            for (c, x) in centroid.iter_mut().zip(point) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let worst_point = simplex[n].0.clone();
        let reflected: Vec<f64> = centroid
            .iter()
            .zip(&worst_point)
            .map(|(c, w)| c + REFLECTION * (c - w))
            .collect();
        let f_reflected = f(&reflected);

        if cmp_objective(f_reflected, simplex[0].1).is_lt() {
            // Best so far: try stretching further in the same direction.
            let expanded: Vec<f64> = centroid
                .iter()
                .zip(&reflected)
                .map(|(c, r)| c + EXPANSION * (r - c))
                .collect();
            let f_expanded = f(&expanded);
            simplex[n] = if cmp_objective(f_expanded, f_reflected).is_lt() {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
        } else if cmp_objective(f_reflected, simplex[n - 1].1).is_lt() {
            simplex[n] = (reflected, f_reflected);
        } else {
            // Reflection did not help: contract toward the better side.
            let (contracted, f_contracted) = if cmp_objective(f_reflected, simplex[n].1).is_lt() {
                let point: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + CONTRACTION * (r - c))
                    .collect();
                let value = f(&point);
                (point, value)
            } else {
                let point: Vec<f64> = centroid
                    .iter()
                    .zip(&worst_point)
                    .map(|(c, w)| c + CONTRACTION * (w - c))
                    .collect();
                let value = f(&point);
                (point, value)
            };

            let replaces = cmp_objective(f_contracted, f_reflected.min(simplex[n].1)).is_le();
            if replaces {
                simplex[n] = (contracted, f_contracted);
            } else {
                // Shrink the whole simplex toward the best vertex.
                let best_point = simplex[0].0.clone();
                for entry in simplex.iter_mut().skip(1) {
                    for (x, b) in entry.0.iter_mut().zip(&best_point) {
                        *x = b + SHRINK * (*x - b);
                    }
                    entry.1 = f(&entry.0);
                }
            }
        }
    }

    simplex.sort_by(|a, b| cmp_objective(a.1, b.1));
    let (parameters, objective_value) = simplex.swap_remove(0);

    debug!(
        "nelder-mead finished: objective={objective_value:.6e}, iterations={iterations}, converged={converged}"
    );

    Ok(OptimizationResult {
        parameters,
        objective_value,
        iterations,
        converged,
    })
}

/// Orders objective values with NaN treated as worst.
fn cmp_objective(a: f64, b: f64) -> std::cmp::Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_bowl() {
        // Minimize (x-2)^2 + (y-3)^2
        let f = |params: &[f64]| {
            let x = params[0];
            let y = params[1];
            (x - 2.0).powi(2) + (y - 3.0).powi(2)
        };

        let result = nelder_mead(f, &[0.0, 0.0], &OptimizerConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-5);
        assert!(result.objective_value < 1e-10);
    }

    #[test]
    fn test_rosenbrock() {
        // Classic banana valley; minimum at (1, 1).
        let f = |p: &[f64]| {
            let (x, y) = (p[0], p[1]);
            (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2)
        };

        let result = nelder_mead(f, &[-1.2, 1.0], &OptimizerConfig::default()).unwrap();

        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(result.parameters[1], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_one_dimensional() {
        let f = |p: &[f64]| (p[0] + 5.0).powi(2) + 7.0;
        let result = nelder_mead(f, &[10.0], &OptimizerConfig::default()).unwrap();

        assert_relative_eq!(result.parameters[0], -5.0, epsilon = 1e-5);
        assert_relative_eq!(result.objective_value, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap_returns_best_effort() {
        let f = |p: &[f64]| {
            let (x, y) = (p[0], p[1]);
            (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2)
        };
        let config = OptimizerConfig::new().with_max_iterations(3);

        let result = nelder_mead(f, &[-1.2, 1.0], &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        // Best effort must not be worse than the starting point.
        assert!(result.objective_value <= f(&[-1.2, 1.0]));
    }

    #[test]
    fn test_deterministic() {
        let f = |p: &[f64]| (p[0] - 0.3).powi(2) + (p[1] * p[1] - 0.5).powi(2);
        let config = OptimizerConfig::default();

        let a = nelder_mead(f, &[1.0, 1.0], &config).unwrap();
        let b = nelder_mead(f, &[1.0, 1.0], &config).unwrap();

        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_empty_initial_point() {
        let result = nelder_mead(|_: &[f64]| 0.0, &[], &OptimizerConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_objective_does_not_win() {
        // Objective is NaN left of the origin; the minimizer must still
        // settle on the finite valley.
        let f = |p: &[f64]| {
            if p[0] < 0.0 {
                f64::NAN
            } else {
                (p[0] - 1.0).powi(2)
            }
        };

        let result = nelder_mead(f, &[2.0], &OptimizerConfig::default()).unwrap();
        assert!(result.objective_value.is_finite());
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-5);
    }
}
