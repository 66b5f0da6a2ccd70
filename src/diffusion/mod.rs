//! Band broadening from polymer diffusion
//!
//! # Organization
//!
//! - **constants**: dsDNA constants and water viscosity
//! - **polymer**: scaling laws (pore size, reduced field, regime coefficients, conversions)
//! - **regime**: the four regimes, their boundaries, and the Zimm/Rouse crossover search
//! - **model**: [`DiffusionModel`], the per-run combination of the above
//!
//! # Per-run scalars
//!
//! ```text
//! a  = sqrt(γ·μL·lp·b / μ0)          pore size
//! ε  = η·a²·μ0·E / (kB·T)            reduced field
//! Db = kB·T / (η·a)                  blob diffusion
//! ```
//!
//! Band broadening per fragment is `sqrt(2·D·t)`; the gel adds it to the
//! well-induced width (linear sum, not quadrature).

pub mod constants;
pub mod model;
pub mod polymer;
pub mod regime;

pub use constants::{water_viscosity, PolymerConstants};
pub use model::{DiffusionInputs, DiffusionModel, DiffusionSummary};
pub use regime::{zimm_rouse_crossover, DiffusionRegime, RegimeBoundaries, RootOutcome};
