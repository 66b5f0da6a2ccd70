//! Per-run diffusion model
//!
//! Computed once per gel run from the run-wide scalars (temperature, field,
//! μ0 and the fitted vWBR μL, γ) and then queried per fragment.

use log::debug;

use crate::diffusion::constants::{water_viscosity, PolymerConstants};
use crate::diffusion::polymer;
use crate::diffusion::regime::{zimm_rouse_crossover, DiffusionRegime, RegimeBoundaries, RootOutcome};
use crate::error::{GelError, Result};

/// Run-wide inputs, SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionInputs {
    /// \[K\]
    pub temperature: f64,
    /// \[V/m\]
    pub field: f64,
    /// Free-solution mobility \[m²/(V·s)\]
    pub mu0: f64,
    /// Fitted long-fragment mobility \[m²/(V·s)\]
    pub mu_l: f64,
    /// Fitted crossover length \[bp\]
    pub gamma: f64,
    /// Agarose concentration \[%\], for the empirical pore size
    pub percent: f64,
}

/// Run-wide diffusion scalars, reported with the gel result
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionSummary {
    /// Water viscosity \[Pa·s\]
    pub viscosity: f64,
    /// Pore size from the vWBR parameters \[m\]
    pub pore_size: f64,
    /// Pore size from the empirical concentration law \[m\]
    pub pore_size_fit: f64,
    /// Reduced field ε
    pub reduced_field: f64,
    /// Reduced field at the Kuhn scale
    pub reduced_field_kuhn: f64,
    /// Blob diffusion coefficient \[m²/s\]
    pub blob_diffusion: f64,
    /// Kuhn-segment diffusion coefficient \[m²/s\]
    pub kuhn_diffusion: f64,
    /// Boundaries in occupied pores
    pub boundaries: RegimeBoundaries,
    /// Boundaries converted to base pairs
    pub boundaries_bp: RegimeBoundaries,
    pub crossover: RootOutcome,
}

/// Diffusion coefficients and regimes for one run
#[derive(Debug, Clone)]
pub struct DiffusionModel {
    constants: PolymerConstants,
    inputs: DiffusionInputs,
    viscosity: f64,
    pore_size: f64,
    reduced_field: f64,
    blob_diffusion: f64,
    boundaries: RegimeBoundaries,
    crossover: RootOutcome,
}

impl DiffusionModel {
    /// Build the model and locate the Zimm/Rouse crossover from `guess_bp`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when an input is not finite and positive or the pore
    ///   size is undefined (μL ≤ 0 from a poor fit)
    /// - `RegimeBoundary` when the crossover search fails
    pub fn new(inputs: DiffusionInputs, constants: PolymerConstants, guess_bp: f64) -> Result<Self> {
        let named = [
            ("temperature", inputs.temperature),
            ("field", inputs.field),
            ("mu0", inputs.mu0),
            ("gamma", inputs.gamma),
            ("percent", inputs.percent),
        ];
        for (name, value) in named {
            if !(value.is_finite() && value > 0.0) {
                return Err(GelError::invalid(format!(
                    "diffusion model needs a positive {}, got {}",
                    name, value
                )));
            }
        }

        let c = constants;
        let t = inputs.temperature;
        let viscosity = water_viscosity(t);
        let pore_size = polymer::pore_size(
            inputs.gamma,
            inputs.mu_l,
            inputs.mu0,
            c.persistence_length,
            c.rise_per_bp,
        );
        if !(pore_size.is_finite() && pore_size > 0.0) {
            return Err(GelError::invalid(format!(
                "pore size undefined for gamma={} bp, muL={} m²/(V·s), mu0={} m²/(V·s)",
                inputs.gamma, inputs.mu_l, inputs.mu0
            )));
        }

        let reduced_field = polymer::reduced_field(viscosity, pore_size, inputs.mu0, inputs.field, c.boltzmann, t);
        let blob_diffusion = polymer::blob_diffusion(c.boltzmann, t, viscosity, pore_size);

        let crossover = zimm_rouse_crossover(|nbp| log_zimm_rouse_ratio(nbp, &inputs, &c, viscosity), guess_bp);
        let crossover_bp = crossover.clone().into_result()?;
        let crossover_n = polymer::nbp_to_n(crossover_bp, pore_size, c.rise_per_bp, c.kuhn_length);
        let boundaries = RegimeBoundaries::from_reduced_field(reduced_field, crossover_n);

        debug!(
            "diffusion: a={:.3e} m, eps={:.3e}, Db={:.3e} m²/s, N_lim1={:.3e}, N_lim2={:.3e}, N_lim3={:.3e} ({:.0} bp)",
            pore_size,
            reduced_field,
            blob_diffusion,
            boundaries.accel_to_plateau,
            boundaries.equil_to_accel,
            boundaries.zimm_to_rouse,
            crossover_bp
        );

        Ok(Self {
            constants,
            inputs,
            viscosity,
            pore_size,
            reduced_field,
            blob_diffusion,
            boundaries,
            crossover,
        })
    }

    pub fn pore_size(&self) -> f64 {
        self.pore_size
    }

    pub fn reduced_field(&self) -> f64 {
        self.reduced_field
    }

    pub fn blob_diffusion(&self) -> f64 {
        self.blob_diffusion
    }

    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Boundaries in occupied pores
    pub fn boundaries(&self) -> RegimeBoundaries {
        self.boundaries
    }

    /// Boundaries in base pairs
    pub fn boundaries_bp(&self) -> RegimeBoundaries {
        let c = &self.constants;
        let a = self.pore_size;
        self.boundaries
            .map(|n| polymer::n_to_nbp(n, a, c.rise_per_bp, c.kuhn_length))
    }

    /// Occupied pores for a fragment of `nbp` base pairs
    pub fn occupied_pores(&self, nbp: f64) -> f64 {
        polymer::nbp_to_n(nbp, self.pore_size, self.constants.rise_per_bp, self.constants.kuhn_length)
    }

    pub fn classify(&self, nbp: f64) -> DiffusionRegime {
        self.boundaries.classify(self.occupied_pores(nbp))
    }

    /// Regime and diffusion coefficient \[m²/s\] of a fragment of `nbp` base pairs
    pub fn diffusion_coefficient(&self, nbp: f64) -> (DiffusionRegime, f64) {
        let n = self.occupied_pores(nbp);
        let regime = self.boundaries.classify(n);
        let (db, eps) = (self.blob_diffusion, self.reduced_field);
        let d = match regime {
            DiffusionRegime::OgstonZimm => self.ogston_zimm(nbp),
            DiffusionRegime::RouseEquilibrium => polymer::reptation_equilibrium(db, n),
            DiffusionRegime::ReptationPlateau => polymer::reptation_plateau(db, eps),
            DiffusionRegime::ReptationAccelerated => polymer::reptation_accelerated(db, eps, n),
        };
        (regime, d)
    }

    /// Diffusional band width \[m\] after `time` seconds
    pub fn band_broadening(&self, nbp: f64, time: f64) -> (DiffusionRegime, f64) {
        let (regime, d) = self.diffusion_coefficient(nbp);
        (regime, polymer::band_broadening(d, time))
    }

    fn ogston_zimm(&self, nbp: f64) -> f64 {
        let c = &self.constants;
        let t = self.inputs.temperature;
        let rg = polymer::radius_of_gyration(polymer::contour_length(nbp, c.rise_per_bp), c.persistence_length);
        let d0 = polymer::free_solution_diffusion(c.boltzmann, t, self.viscosity, rg);
        let d_rouse = polymer::rouse_diffusion(
            nbp,
            c.boltzmann,
            t,
            self.pore_size,
            self.viscosity,
            c.rise_per_bp,
            c.kuhn_length,
        );
        let g = polymer::zimm_reduction(nbp, d_rouse, c.effective_charge_per_bp, self.inputs.mu0, c.boltzmann, t);
        d0 * g
    }

    pub fn summary(&self) -> DiffusionSummary {
        let c = &self.constants;
        let t = self.inputs.temperature;
        DiffusionSummary {
            viscosity: self.viscosity,
            pore_size: self.pore_size,
            pore_size_fit: polymer::pore_size_from_concentration(self.inputs.percent),
            reduced_field: self.reduced_field,
            reduced_field_kuhn: polymer::reduced_field_kuhn(
                self.viscosity,
                c.kuhn_length,
                self.inputs.mu0,
                self.inputs.field,
                c.boltzmann,
                t,
            ),
            blob_diffusion: self.blob_diffusion,
            kuhn_diffusion: polymer::kuhn_diffusion(c.boltzmann, t, self.viscosity, c.kuhn_length),
            boundaries: self.boundaries,
            boundaries_bp: self.boundaries_bp(),
            crossover: self.crossover.clone(),
        }
    }
}

/// `ln(D_Zimm / D_Rouse)` at `nbp` base pairs
///
/// `D_Zimm = D0·g` with `g ∝ D_Rouse`, so the ratio reduces to
/// `Nbp·q_eff / (6π·η·Rg·μ0)`: independent of pore size and increasing in `Nbp`.
fn log_zimm_rouse_ratio(nbp: f64, inputs: &DiffusionInputs, c: &PolymerConstants, viscosity: f64) -> f64 {
    let rg = polymer::radius_of_gyration(polymer::contour_length(nbp, c.rise_per_bp), c.persistence_length);
    let d0 = polymer::free_solution_diffusion(c.boltzmann, inputs.temperature, viscosity, rg);
    (d0 * nbp * c.effective_charge_per_bp / (inputs.mu0 * c.boltzmann * inputs.temperature)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Roughly a 1 % gel at 5 V/cm, room temperature
    fn inputs() -> DiffusionInputs {
        DiffusionInputs {
            temperature: 295.15,
            field: 500.0,
            mu0: 3.5e-8,
            mu_l: 0.6e-8,
            gamma: 5000.0,
            percent: 1.0,
        }
    }

    #[test]
    fn test_crossover_equates_zimm_and_rouse() {
        let model = DiffusionModel::new(inputs(), PolymerConstants::default(), 2000.0).unwrap();
        let nbp = model.boundaries_bp().zimm_to_rouse;
        let c = PolymerConstants::default();
        let d_rouse = polymer::rouse_diffusion(
            nbp,
            c.boltzmann,
            295.15,
            model.pore_size(),
            model.viscosity(),
            c.rise_per_bp,
            c.kuhn_length,
        );
        assert_relative_eq!(model.ogston_zimm(nbp), d_rouse, max_relative = 1e-8);
        assert!(nbp > 100.0 && nbp < 100_000.0, "crossover {} bp", nbp);
    }

    #[test]
    fn test_pore_size_formula() {
        let model = DiffusionModel::new(inputs(), PolymerConstants::default(), 2000.0).unwrap();
        let expected = (5000.0 * 0.6e-8 * 50e-9 * 0.34e-9 / 3.5e-8f64).sqrt();
        assert_relative_eq!(model.pore_size(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_every_length_gets_positive_coefficient() {
        let model = DiffusionModel::new(inputs(), PolymerConstants::default(), 2000.0).unwrap();
        for &nbp in &[50.0, 500.0, 5000.0, 50_000.0, 500_000.0] {
            let (_, d) = model.diffusion_coefficient(nbp);
            assert!(d.is_finite() && d > 0.0, "D({}) = {}", nbp, d);
        }
    }

    #[test]
    fn test_short_fragments_are_ogston_zimm() {
        let model = DiffusionModel::new(inputs(), PolymerConstants::default(), 2000.0).unwrap();
        assert_eq!(model.classify(50.0), DiffusionRegime::OgstonZimm);
    }

    #[test]
    fn test_negative_mu_l_is_rejected() {
        let mut bad = inputs();
        bad.mu_l = -1e-9;
        assert!(matches!(
            DiffusionModel::new(bad, PolymerConstants::default(), 2000.0),
            Err(GelError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_summary_converts_boundaries() {
        let model = DiffusionModel::new(inputs(), PolymerConstants::default(), 2000.0).unwrap();
        let s = model.summary();
        assert!(s.crossover.is_converged());
        assert_relative_eq!(
            model.occupied_pores(s.boundaries_bp.equil_to_accel),
            s.boundaries.equil_to_accel,
            max_relative = 1e-12
        );
        assert_relative_eq!(s.pore_size_fit, 143e-9, max_relative = 1e-12);
    }
}
