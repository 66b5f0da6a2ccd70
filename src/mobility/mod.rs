//! Electrophoretic mobility of DNA fragments in agarose
//!
//! # Organization
//!
//! - **vwbr**: the three-parameter (μS, μL, γ) length/mobility relation
//! - **interpolation**: Delaunay-based scattered interpolation over (field, %agarose)
//! - **fit**: Levenberg–Marquardt least squares on `nalgebra`
//! - **model**: [`MobilityModel`], which combines the three against a calibration set
//!
//! # Example
//!
//! ```rust
//! use gel_rs::calibration::{CalibrationStore, DatasetName};
//! use gel_rs::mobility::{InterpolationMethod, MobilityModel};
//!
//! let store = CalibrationStore::builtin();
//! let set = store.get(DatasetName::Vertical).unwrap();
//! let model = MobilityModel::new(set, InterpolationMethod::Linear, true);
//!
//! let mu = model.mobility_at(1000.0, 5.0, 1.0).unwrap();
//! assert!(mu > 0.0);
//! ```

pub mod fit;
pub mod interpolation;
pub mod model;
pub mod vwbr;

pub use fit::{levenberg_marquardt, LeastSquaresOptions, LeastSquaresReport};
pub use interpolation::{InterpolationMethod, ScatteredInterpolator, Triangulation};
pub use model::{MobilityModel, VwbrFit};
pub use vwbr::{vwbr_mobility, VwbrParams};
