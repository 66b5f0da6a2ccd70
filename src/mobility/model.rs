//! Calibration-driven mobility model
//!
//! For a fragment length `L`, every calibration point yields one mobility
//! `μ_k(L)` through its own vWBR triple. Those values are scattered over the
//! (field, %agarose) plane and interpolated at the requested condition.
//!
//! Fitting a vWBR triple to an arbitrary condition repeats this for a set of
//! probe lengths and runs a least-squares fit on the resulting curve.

use log::{debug, warn};
use nalgebra::DVector;

use crate::calibration::CalibrationSet;
use crate::error::{GelError, Result};
use crate::mobility::fit::{levenberg_marquardt, LeastSquaresOptions};
use crate::mobility::interpolation::{InterpolationMethod, ScatteredInterpolator};
use crate::mobility::vwbr::{vwbr_mobility, VwbrParams};

/// Initial guess for μS \[cm²/(V·s)\]
pub const INITIAL_MU_S: f64 = 3.5e-4;
/// Initial guess for μL \[cm²/(V·s)\]
pub const INITIAL_MU_L: f64 = 1.0e-4;
/// Initial guess for γ \[bp\]
pub const INITIAL_GAMMA: f64 = 8000.0;

/// Result of [`MobilityModel::fit_transport_params`]
#[derive(Debug, Clone)]
pub struct VwbrFit {
    pub params: VwbrParams,
    /// `(JᵀJ)⁻¹` in (μS, μL, γ) order; `None` if singular
    pub covariance: Option<[[f64; 3]; 3]>,
    /// `false` means the parameters are returned but should not be trusted
    pub converged: bool,
    pub iterations: usize,
    pub residual_sum_squares: f64,
    pub message: String,
    /// (length \[bp\], mobility \[cm²/(V·s)\]) pairs the fit used
    pub probes: Vec<(f64, f64)>,
}

/// Mobility as a function of (length, field, percent) for one calibration set
#[derive(Debug, Clone)]
pub struct MobilityModel {
    curves: Vec<VwbrParams>,
    interpolator: ScatteredInterpolator,
    method: InterpolationMethod,
    replace_nans: bool,
}

impl MobilityModel {
    /// # Arguments
    ///
    /// * `set` - Calibration points
    /// * `method` - Primary interpolation method
    /// * `replace_nans` - Retry with nearest-neighbour when the primary method is undefined
    pub fn new(set: &CalibrationSet, method: InterpolationMethod, replace_nans: bool) -> Self {
        let coords: Vec<[f64; 2]> = set.points().iter().map(|p| p.coordinates()).collect();
        Self {
            curves: set.points().iter().map(|p| p.vwbr()).collect(),
            interpolator: ScatteredInterpolator::new(&coords),
            method,
            replace_nans,
        }
    }

    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    pub fn replace_nans(&self) -> bool {
        self.replace_nans
    }

    /// Mobility \[cm²/(V·s)\] of a `length` bp fragment at `field` V/cm and `percent` % agarose
    ///
    /// # Errors
    ///
    /// [`GelError::InterpolationUndefined`] when the primary method is
    /// undefined and either the fallback is disabled or it is undefined too.
    /// Any finite interpolated value is returned as is, sign included.
    pub fn mobility_at(&self, length: f64, field: f64, percent: f64) -> Result<f64> {
        let values: Vec<f64> = self.curves.iter().map(|c| c.mobility(length)).collect();
        let at = [field, percent];

        let primary = self
            .interpolator
            .interpolate(&values, at, self.method)
            .filter(|mu| mu.is_finite());
        if let Some(mu) = primary {
            return Ok(mu);
        }

        let undefined = GelError::InterpolationUndefined {
            length,
            field,
            percent,
        };
        if !self.replace_nans || self.method == InterpolationMethod::Nearest {
            return Err(undefined);
        }

        match self.interpolator.nearest(&values, at).filter(|mu| mu.is_finite()) {
            Some(mu) => {
                warn!(
                    "{} interpolation undefined at {} bp, {} V/cm, {} %; using nearest-neighbour value {:.4e}",
                    self.method, length, field, percent, mu
                );
                Ok(mu)
            }
            None => Err(undefined),
        }
    }

    /// [`mobility_at`](Self::mobility_at) over many lengths at one condition
    pub fn mobility_curve_at(&self, field: f64, percent: f64, lengths: &[f64]) -> Result<Vec<f64>> {
        lengths
            .iter()
            .map(|&l| self.mobility_at(l, field, percent))
            .collect()
    }

    /// Fit (μS, μL, γ) to the interpolated mobilities at `lengths`
    ///
    /// Probe lengths whose mobility is undefined are left out of the fit.
    ///
    /// # Errors
    ///
    /// [`GelError::FitUndefined`] when fewer than three distinct probe lengths
    /// have a defined mobility. Non-convergence is not an error: it is
    /// reported through [`VwbrFit::converged`] and a `warn!` record.
    pub fn fit_transport_params(&self, field: f64, percent: f64, lengths: &[f64]) -> Result<VwbrFit> {
        let mut probes: Vec<(f64, f64)> = Vec::with_capacity(lengths.len());
        for &length in lengths {
            match self.mobility_at(length, field, percent) {
                Ok(mu) => probes.push((length, mu)),
                Err(GelError::InterpolationUndefined { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        let mut distinct: Vec<f64> = probes.iter().map(|(l, _)| *l).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(GelError::FitUndefined {
                usable: distinct.len(),
            });
        }

        let residuals = |p: &DVector<f64>| {
            DVector::from_iterator(
                probes.len(),
                probes.iter().map(|(l, mu)| mu - vwbr_mobility(*l, p[0], p[1], p[2])),
            )
        };
        let report = levenberg_marquardt(
            residuals,
            &[INITIAL_MU_S, INITIAL_MU_L, INITIAL_GAMMA],
            &LeastSquaresOptions::default(),
        );

        let params = VwbrParams::new(report.params[0], report.params[1], report.params[2]);
        if !report.converged {
            warn!(
                "vWBR fit at {} V/cm, {} % did not converge ({}); muS={:.4e}, muL={:.4e}, gamma={:.1}",
                field, percent, report.message, params.mu_s, params.mu_l, params.gamma
            );
        } else {
            debug!(
                "vWBR fit at {} V/cm, {} %: muS={:.4e}, muL={:.4e}, gamma={:.1} after {} iterations",
                field, percent, params.mu_s, params.mu_l, params.gamma, report.iterations
            );
        }

        let covariance = report.covariance.map(|c| {
            let mut out = [[0.0; 3]; 3];
            for (i, row) in out.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = c[(i, j)];
                }
            }
            out
        });

        Ok(VwbrFit {
            params,
            covariance,
            converged: report.converged,
            iterations: report.iterations,
            residual_sum_squares: report.residual_sum_squares,
            message: report.message,
            probes,
        })
    }
}
