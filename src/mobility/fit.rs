//! Levenberg–Marquardt nonlinear least squares
//!
//! Minimises `‖r(p)‖²` for a residual function `r: ℝⁿ → ℝᵐ` (m ≥ n).
//!
//! # Algorithm
//!
//! At each iteration the Jacobian `J` is estimated by forward differences and
//! the damped normal equations are solved in Jacobi-scaled variables:
//!
//! ```text
//! S = diag(JᵀJ)^(-1/2)
//! (S·JᵀJ·S + λ·I) · δ' = −S·Jᵀr      δ = S·δ'
//! ```
//!
//! The scaling makes the step independent of parameter magnitudes, which
//! matters for vWBR where mobilities are ~1e-4 and γ is ~1e4.
//!
//! A step is accepted when it lowers the cost; λ then shrinks, otherwise it
//! grows and the step is retried. Convergence is declared on small relative
//! cost reduction (`ftol`) or small relative step (`xtol`).
//!
//! The covariance returned is `(JᵀJ)⁻¹` at the solution, not multiplied by
//! the residual variance. It is `None` when `JᵀJ` is singular.

use nalgebra::{DMatrix, DVector};

/// Stopping criteria
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresOptions {
    /// Relative tolerance on the cost reduction
    pub ftol: f64,
    /// Relative tolerance on the parameter step
    pub xtol: f64,
    /// Upper bound on residual evaluations, Jacobian columns included
    pub max_evaluations: usize,
}

impl Default for LeastSquaresOptions {
    fn default() -> Self {
        Self {
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            max_evaluations: 800,
        }
    }
}

/// Outcome of a least-squares run
#[derive(Debug, Clone)]
pub struct LeastSquaresReport {
    pub params: DVector<f64>,
    pub covariance: Option<DMatrix<f64>>,
    pub converged: bool,
    pub iterations: usize,
    pub evaluations: usize,
    pub residual_sum_squares: f64,
    pub message: String,
}

/// Largest damping tried before giving up on improving the cost
const MAX_LAMBDA: f64 = 1e16;

/// Cosine between residual and Jacobian columns below which a stalled fit counts as converged
const STATIONARY_TOLERANCE: f64 = 1e-6;

/// Fit parameters starting at `initial`
///
/// `residuals` must return a vector of constant length for every parameter vector.
pub fn levenberg_marquardt<F>(residuals: F, initial: &[f64], options: &LeastSquaresOptions) -> LeastSquaresReport
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = initial.len();
    let mut x = DVector::from_column_slice(initial);
    let mut r = residuals(&x);
    let mut evaluations = 1;
    let mut cost = r.norm_squared();
    let mut lambda = 1e-3;
    let mut iterations = 0;

    if !cost.is_finite() {
        return LeastSquaresReport {
            params: x,
            covariance: None,
            converged: false,
            iterations,
            evaluations,
            residual_sum_squares: cost,
            message: "residuals not finite at the initial guess".to_string(),
        };
    }

    let (converged, message) = loop {
        if evaluations + n >= options.max_evaluations {
            break (false, "maximum number of residual evaluations reached".to_string());
        }

        let jac = jacobian(&residuals, &x, &r);
        evaluations += n;
        iterations += 1;

        let jtj = jac.transpose() * &jac;
        let jtr = jac.transpose() * &r;

        let scale = DVector::from_iterator(
            n,
            jtj.diagonal().iter().map(|&d| if d > 0.0 { 1.0 / d.sqrt() } else { 1.0 }),
        );
        let scaled = DMatrix::from_fn(n, n, |i, j| jtj[(i, j)] * scale[i] * scale[j]);
        let scaled_grad = jtr.component_mul(&scale);

        if scaled_grad.amax() == 0.0 {
            break (true, "gradient vanished".to_string());
        }

        // inner loop: raise λ until a step lowers the cost
        let step = loop {
            if lambda > MAX_LAMBDA {
                break None;
            }
            if evaluations >= options.max_evaluations {
                break None;
            }

            let damped = &scaled + DMatrix::identity(n, n) * lambda;
            let Some(chol) = damped.cholesky() else {
                lambda *= 10.0;
                continue;
            };
            let delta = chol.solve(&(-&scaled_grad)).component_mul(&scale);
            let candidate = &x + &delta;
            let r_new = residuals(&candidate);
            evaluations += 1;
            let cost_new = r_new.norm_squared();

            if cost_new.is_finite() && cost_new < cost {
                lambda = (lambda / 10.0).max(1e-12);
                break Some((candidate, r_new, cost_new, delta));
            }
            lambda *= 10.0;
        };

        let Some((candidate, r_new, cost_new, delta)) = step else {
            let reason = if lambda > MAX_LAMBDA {
                "no further reduction in the sum of squares is possible"
            } else {
                "maximum number of residual evaluations reached"
            };
            // stalled at a stationary point: residual orthogonal to every Jacobian column
            let orthogonality = scaled_grad.amax() / cost.sqrt();
            let stationary = cost <= f64::EPSILON || orthogonality <= STATIONARY_TOLERANCE;
            break (lambda > MAX_LAMBDA && stationary, reason.to_string());
        };

        let reduction = (cost - cost_new) / cost.max(f64::MIN_POSITIVE);
        let step_size = delta.norm() / (x.norm() + options.xtol).max(f64::MIN_POSITIVE);
        let scaled_step = delta.component_div(&scale).norm();
        let scaled_x = x.component_div(&scale).norm();

        x = candidate;
        r = r_new;
        cost = cost_new;

        if reduction <= options.ftol {
            break (true, "relative reduction in the sum of squares is below ftol".to_string());
        }
        if scaled_step <= options.xtol * scaled_x || step_size <= f64::EPSILON {
            break (true, "relative change in the parameters is below xtol".to_string());
        }
        if cost == 0.0 {
            break (true, "exact fit".to_string());
        }
    };

    let jac = jacobian(&residuals, &x, &r);
    let covariance = (jac.transpose() * &jac).try_inverse();

    LeastSquaresReport {
        params: x,
        covariance,
        converged,
        iterations,
        evaluations: evaluations + n,
        residual_sum_squares: cost,
        message,
    }
}

/// Forward-difference Jacobian, `m × n`
fn jacobian<F>(residuals: &F, x: &DVector<f64>, r0: &DVector<f64>) -> DMatrix<f64>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let eps = f64::EPSILON.sqrt();
    let mut jac = DMatrix::zeros(r0.len(), x.len());
    for j in 0..x.len() {
        let h = if x[j] != 0.0 { eps * x[j].abs() } else { eps };
        let mut shifted = x.clone();
        shifted[j] += h;
        let column = (residuals(&shifted) - r0) / h;
        jac.set_column(j, &column);
    }
    jac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_model_exact() {
        // y = 2x + 1
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let report = levenberg_marquardt(
            |p| DVector::from_iterator(xs.len(), xs.iter().zip(&ys).map(|(x, y)| y - (p[0] * x + p[1]))),
            &[0.0, 0.0],
            &LeastSquaresOptions::default(),
        );
        assert!(report.converged, "{}", report.message);
        assert_relative_eq!(report.params[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(report.params[1], 1.0, epsilon = 1e-6);
        assert!(report.covariance.is_some());
    }

    #[test]
    fn test_exponential_decay() {
        let ts: Vec<f64> = (0..20).map(|i| i as f64 * 0.25).collect();
        let ys: Vec<f64> = ts.iter().map(|t| 3.0 * (-0.7 * t).exp()).collect();
        let report = levenberg_marquardt(
            |p| DVector::from_iterator(ts.len(), ts.iter().zip(&ys).map(|(t, y)| y - p[0] * (-p[1] * t).exp())),
            &[1.0, 0.1],
            &LeastSquaresOptions::default(),
        );
        assert!(report.converged, "{}", report.message);
        assert_relative_eq!(report.params[0], 3.0, max_relative = 1e-5);
        assert_relative_eq!(report.params[1], 0.7, max_relative = 1e-5);
        assert!(report.residual_sum_squares < 1e-12);
    }

    #[test]
    fn test_singular_covariance_is_none() {
        // p[1] never influences the residual
        let report = levenberg_marquardt(
            |p| DVector::from_vec(vec![p[0] - 1.0, p[0] - 1.0]),
            &[0.0, 5.0],
            &LeastSquaresOptions::default(),
        );
        assert_relative_eq!(report.params[0], 1.0, epsilon = 1e-6);
        assert!(report.covariance.is_none());
    }

    #[test]
    fn test_evaluation_limit_reported() {
        let options = LeastSquaresOptions {
            max_evaluations: 3,
            ..Default::default()
        };
        let report = levenberg_marquardt(
            |p| DVector::from_vec(vec![p[0].exp() - 10.0, p[1] - 2.0]),
            &[0.0, 0.0],
            &options,
        );
        assert!(!report.converged);
        assert!(report.message.contains("maximum"));
    }
}
