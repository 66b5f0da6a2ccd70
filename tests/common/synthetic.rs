//! Synthetic calibration data with known answers
//!
//! Every condition shares one vWBR triple scaled by `exp(-SCALE_RATE · %)`.
//! Scaling μS and μL together scales the whole vWBR curve, so `ln μ` is
//! exactly linear in the gel strength and the Ferguson intercept is known.

use std::sync::Arc;

use gel_rs::calibration::{CalibrationPoint, CalibrationSet, CalibrationStore, DatasetName};
use gel_rs::mobility::VwbrParams;

/// Decay of both mobility limits per % agarose
pub const SCALE_RATE: f64 = 0.3;

/// The unscaled (0 %) triple
pub fn uniform_triple() -> VwbrParams {
    VwbrParams::new(3.0e-4, 0.6e-4, 6000.0)
}

/// Fields 1..7 V/cm and strengths 0.5..2 %, registered under both dataset names
pub fn scaled_store() -> Arc<CalibrationStore> {
    let base = uniform_triple();
    let mut points = Vec::new();
    for field in [1.0, 3.0, 5.0, 7.0] {
        for percent in [0.5, 1.0, 1.5, 2.0] {
            let k = (-SCALE_RATE * percent).exp();
            points.push(CalibrationPoint::new(field, percent, base.mu_s * k, base.mu_l * k, base.gamma));
        }
    }
    let set = CalibrationSet::new(points).expect("synthetic set is valid");
    Arc::new(CalibrationStore::new([
        (DatasetName::Vertical, set.clone()),
        (DatasetName::Horizontal, set),
    ]))
}
