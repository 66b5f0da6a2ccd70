//! Polymer scaling laws for DNA in a gel
//!
//! All functions work in SI units (m, s, kg, K, C) with lengths of DNA in
//! base pairs. Notation:
//!
//! - **Nbp**: fragment length \[bp\]
//! - **NKuhn**: number of Kuhn segments
//! - **N**: number of occupied pores ("blobs")
//! - **a**: gel pore size \[m\]
//! - **b**: contour length per base pair \[m/bp\]
//! - **l**: Kuhn length \[m\]
//! - **lp**: persistence length \[m\]
//! - **η**: solvent viscosity \[Pa·s\]
//! - **ε**: reduced field (dimensionless)

use std::f64::consts::PI;

// =================================================================================================
// Geometry
// =================================================================================================

/// Contour length \[m\]
pub fn contour_length(nbp: f64, b: f64) -> f64 {
    nbp * b
}

/// Radius of gyration of a worm-like chain of contour length `contour` \[m\]
///
/// ```text
/// Rg = sqrt( lp·L/3 · (1 − lp/L + lp/L · exp(−L/lp)) )
/// ```
pub fn radius_of_gyration(contour: f64, lp: f64) -> f64 {
    let ratio = lp / contour;
    (lp * contour / 3.0 * (1.0 - ratio + ratio * (-contour / lp).exp())).sqrt()
}

/// Pore size from the vWBR parameters \[m\]
///
/// ```text
/// a = sqrt(γ·μL·lp·b / μ0)
/// ```
///
/// `gamma` in bp, mobilities in any common unit.
pub fn pore_size(gamma: f64, mu_l: f64, mu0: f64, lp: f64, b: f64) -> f64 {
    (gamma * mu_l * lp * b / mu0).sqrt()
}

/// Empirical pore size \[m\] for an agarose gel of `percent` % (w/v)
///
/// ```text
/// a = 143 nm · C^-0.59
/// ```
pub fn pore_size_from_concentration(percent: f64) -> f64 {
    143e-9 * percent.powf(-0.59)
}

// =================================================================================================
// Unit conversions between base pairs, Kuhn segments and occupied pores
// =================================================================================================

pub fn nbp_to_nkuhn(nbp: f64, b: f64, l: f64) -> f64 {
    nbp * b / l
}

pub fn nkuhn_to_nbp(nkuhn: f64, b: f64, l: f64) -> f64 {
    nkuhn * l / b
}

pub fn nkuhn_to_n(nkuhn: f64, l: f64, a: f64) -> f64 {
    nkuhn * (l / a).powi(2)
}

pub fn n_to_nkuhn(n: f64, a: f64, l: f64) -> f64 {
    n * (a / l).powi(2)
}

/// Occupied pores for a fragment of `nbp` base pairs
pub fn nbp_to_n(nbp: f64, a: f64, b: f64, l: f64) -> f64 {
    nbp * (b / l) * (l / a).powi(2)
}

/// Base pairs for `n` occupied pores
pub fn n_to_nbp(n: f64, a: f64, b: f64, l: f64) -> f64 {
    n * (l / b) * (a / l).powi(2)
}

// =================================================================================================
// Fields and diffusion coefficients
// =================================================================================================

/// Reduced field `ε = η·a²·μ0·E / (kB·T)`
///
/// `mu0` in m²/(V·s), `field` in V/m.
pub fn reduced_field(eta: f64, a: f64, mu0: f64, field: f64, kb: f64, temperature: f64) -> f64 {
    eta * a * a * mu0 * field / (kb * temperature)
}

/// Reduced field at the Kuhn scale, `a` replaced by `l`
pub fn reduced_field_kuhn(eta: f64, l: f64, mu0: f64, field: f64, kb: f64, temperature: f64) -> f64 {
    reduced_field(eta, l, mu0, field, kb, temperature)
}

/// Diffusion coefficient of one blob \[m²/s\]
pub fn blob_diffusion(kb: f64, temperature: f64, eta: f64, a: f64) -> f64 {
    kb * temperature / (eta * a)
}

/// Diffusion coefficient of one Kuhn segment \[m²/s\]
pub fn kuhn_diffusion(kb: f64, temperature: f64, eta: f64, l: f64) -> f64 {
    kb * temperature / (eta * l)
}

/// Stokes–Einstein free-solution diffusion for hydrodynamic radius `rh` \[m²/s\]
pub fn free_solution_diffusion(kb: f64, temperature: f64, eta: f64, rh: f64) -> f64 {
    kb * temperature / (6.0 * PI * eta * rh)
}

/// Ogston–Rouse diffusion \[m²/s\]
///
/// ```text
/// D = kB·T·a³ / (η·b²·l²·Nbp²)
/// ```
pub fn rouse_diffusion(nbp: f64, kb: f64, temperature: f64, a: f64, eta: f64, b: f64, l: f64) -> f64 {
    kb * temperature * a.powi(3) / (eta * b * b * l * l * nbp * nbp)
}

/// Zimm reduction factor `g = D_Rouse·Nbp·q_eff / (μ0·kB·T)` (dimensionless)
pub fn zimm_reduction(nbp: f64, d_rouse: f64, qeff: f64, mu0: f64, kb: f64, temperature: f64) -> f64 {
    d_rouse * nbp * qeff / (mu0 * kb * temperature)
}

pub fn reptation_equilibrium(db: f64, n: f64) -> f64 {
    db / (n * n)
}

pub fn reptation_accelerated(db: f64, epsilon: f64, n: f64) -> f64 {
    db * epsilon * n.powf(-0.5)
}

pub fn reptation_plateau(db: f64, epsilon: f64) -> f64 {
    db * epsilon.powf(1.5)
}

/// Band width \[m\] after diffusing for `time` \[s\]: `sqrt(2·D·t)`
pub fn band_broadening(diffusion: f64, time: f64) -> f64 {
    (2.0 * diffusion * time).sqrt()
}
