//! Free-solution mobility by Ferguson extrapolation
//!
//! # Ferguson plot
//!
//! At fixed field, the mobility of a fragment falls exponentially with gel
//! concentration T:
//!
//! ```text
//! ln μ(L, T) = ln μ0 − K_r(L) · T
//! ```
//!
//! For each probe length the interpolated `ln μ` is regressed against T.
//! Every intercept estimates `ln μ0`; the estimate is `μ0 = exp(mean of intercepts)`.
//!
//! # Exclusion policy
//!
//! A length whose regression has fewer than two defined points is dropped
//! as a whole, not point by point. If every length is dropped μ0 is
//! undefined and reported as `None`.

use log::{debug, warn};
use ndarray::Array2;

use crate::error::{GelError, Result};
use crate::mobility::MobilityModel;

/// Ordinary least-squares line `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r_value: f64,
    /// Standard error of the slope (0 for two points)
    pub std_err: f64,
    pub points: usize,
}

/// Fit a straight line; `None` with fewer than two points or no spread in `x`
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearRegression> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = x[..n].iter().sum::<f64>() / nf;
    let mean_y = y[..n].iter().sum::<f64>() / nf;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x[..n].iter().zip(&y[..n]) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx = dx.mul_add(dx, sxx);
        syy = dy.mul_add(dy, syy);
        sxy = dx.mul_add(dy, sxy);
    }
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_value = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let std_err = if n > 2 {
        ((1.0 - r_value * r_value).max(0.0) * syy / sxx / (nf - 2.0)).sqrt()
    } else {
        0.0
    };

    Some(LinearRegression {
        slope,
        intercept,
        r_value,
        std_err,
        points: n,
    })
}

/// Regression for one probe length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FergusonLine {
    /// Probe length \[bp\]
    pub length: f64,
    pub fit: LinearRegression,
}

/// Everything computed for one Ferguson extrapolation
#[derive(Debug, Clone)]
pub struct FergusonResult {
    /// Field \[V/cm\]
    pub field: f64,
    /// Gel strengths \[%\], column order of `ln_mobility`
    pub percents: Vec<f64>,
    /// Probe lengths \[bp\], row order of `ln_mobility`
    pub lengths: Vec<f64>,
    /// `ln μ` with μ in cm²/(V·s); NaN where the mobility is undefined
    pub ln_mobility: Array2<f64>,
    /// One line per length that qualified
    pub lines: Vec<FergusonLine>,
    /// Lengths dropped for having fewer than two defined points
    pub excluded: Vec<f64>,
    /// Free-solution mobility \[cm²/(V·s)\]
    pub mu0: Option<f64>,
}

impl FergusonResult {
    /// μ0, or [`GelError::FreeSolutionUndefined`] if no length qualified
    pub fn require_mu0(&self) -> Result<f64> {
        self.mu0
            .ok_or(GelError::FreeSolutionUndefined { field: self.field })
    }
}

/// Extrapolate μ0 at `field` from the interpolated mobilities over `percents × lengths`
///
/// # Errors
///
/// `InvalidInput` for empty grids. Interpolation failures become NaN cells;
/// any other error from the mobility model is propagated.
pub fn ferguson_to_mu0(
    model: &MobilityModel,
    field: f64,
    percents: &[f64],
    lengths: &[f64],
) -> Result<FergusonResult> {
    if percents.is_empty() || lengths.is_empty() {
        return Err(GelError::invalid(
            "Ferguson extrapolation needs at least one gel strength and one probe length",
        ));
    }

    let mut ln_mobility = Array2::<f64>::from_elem((lengths.len(), percents.len()), f64::NAN);
    for (i, &length) in lengths.iter().enumerate() {
        for (j, &percent) in percents.iter().enumerate() {
            match model.mobility_at(length, field, percent) {
                Ok(mu) => ln_mobility[[i, j]] = mu.ln(),
                Err(GelError::InterpolationUndefined { .. }) => {}
                Err(e) => return Err(e),
            }
        }
    }

    let mut lines = Vec::new();
    let mut excluded = Vec::new();
    for (i, row) in ln_mobility.rows().into_iter().enumerate() {
        let (x, y): (Vec<f64>, Vec<f64>) = percents
            .iter()
            .zip(row.iter())
            .filter(|(_, v)| v.is_finite())
            .map(|(p, v)| (*p, *v))
            .unzip();

        match linear_regression(&x, &y) {
            Some(fit) => lines.push(FergusonLine {
                length: lengths[i],
                fit,
            }),
            None => excluded.push(lengths[i]),
        }
    }

    let mu0 = if lines.is_empty() {
        warn!("free-solution mobility undefined at {} V/cm: no probe length qualified", field);
        None
    } else {
        let mean = lines.iter().map(|l| l.fit.intercept).sum::<f64>() / lines.len() as f64;
        Some(mean.exp())
    };

    debug!(
        "Ferguson at {} V/cm: {} lines, {} excluded, mu0 = {:?}",
        field,
        lines.len(),
        excluded.len(),
        mu0
    );

    Ok(FergusonResult {
        field,
        percents: percents.to_vec(),
        lengths: lengths.to_vec(),
        ln_mobility,
        lines,
        excluded,
        mu0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationPoint, CalibrationSet};
    use crate::mobility::InterpolationMethod;
    use approx::assert_relative_eq;

    #[test]
    fn test_regression_exact_line() {
        let fit = linear_regression(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.std_err, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_regression_two_points_has_zero_stderr() {
        let fit = linear_regression(&[0.5, 1.5], &[2.0, 1.0]).unwrap();
        assert_relative_eq!(fit.slope, -1.0, epsilon = 1e-12);
        assert_eq!(fit.std_err, 0.0);
    }

    #[test]
    fn test_regression_undefined() {
        assert!(linear_regression(&[1.0], &[1.0]).is_none());
        assert!(linear_regression(&[1.0, 1.0], &[1.0, 2.0]).is_none());
    }

    /// μS(T) = μ0·exp(−k·T) with μL = μS and γ arbitrary: every length sees the same μ
    fn ferguson_set(mu0: f64, k: f64) -> CalibrationSet {
        let mut points = Vec::new();
        for &field in &[1.0, 5.0] {
            for &percent in &[0.5, 1.0, 1.5] {
                let mu = mu0 * (-k * percent).exp();
                points.push(CalibrationPoint::new(field, percent, mu, mu, 1000.0));
            }
        }
        CalibrationSet::new(points).unwrap()
    }

    #[test]
    fn test_exponential_calibration_recovers_mu0() {
        let model = MobilityModel::new(&ferguson_set(4.0e-4, 0.8), InterpolationMethod::Linear, false);
        let result = ferguson_to_mu0(&model, 3.0, &[0.5, 1.0, 1.5], &[100.0, 1000.0]).unwrap();
        assert_relative_eq!(result.mu0.unwrap(), 4.0e-4, max_relative = 1e-9);
        assert_eq!(result.lines.len(), 2);
        assert!(result.excluded.is_empty());
        assert_eq!(result.ln_mobility.dim(), (2, 3));
    }

    #[test]
    fn test_no_qualifying_length_is_undefined() {
        let model = MobilityModel::new(&ferguson_set(4.0e-4, 0.8), InterpolationMethod::Linear, false);
        // field 20 V/cm lies outside every calibration triangle
        let result = ferguson_to_mu0(&model, 20.0, &[0.5, 1.0], &[100.0, 1000.0]).unwrap();
        assert!(result.mu0.is_none());
        assert_eq!(result.excluded, vec![100.0, 1000.0]);
        assert!(matches!(result.require_mu0(), Err(GelError::FreeSolutionUndefined { .. })));
    }

    #[test]
    fn test_single_defined_point_excludes_length() {
        let model = MobilityModel::new(&ferguson_set(4.0e-4, 0.8), InterpolationMethod::Linear, false);
        // 2.0 % is outside the hull; only 1.0 % is defined
        let result = ferguson_to_mu0(&model, 3.0, &[1.0, 2.0], &[500.0]).unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.excluded, vec![500.0]);
        assert!(result.ln_mobility[[0, 1]].is_nan());
    }

    #[test]
    fn test_empty_grid_rejected() {
        let model = MobilityModel::new(&ferguson_set(4.0e-4, 0.8), InterpolationMethod::Linear, false);
        assert!(ferguson_to_mu0(&model, 3.0, &[], &[100.0]).is_err());
    }
}
