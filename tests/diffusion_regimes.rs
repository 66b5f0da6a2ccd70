//! Regime classification and band broadening over a wide length range

use gel_rs::diffusion::{DiffusionInputs, DiffusionModel, DiffusionRegime, PolymerConstants};
use gel_rs::sample::logspace_int;

mod common;
use common::init_logging;

/// 1 % gel at 5 V/cm, room temperature, SI units
fn model() -> DiffusionModel {
    init_logging();
    let inputs = DiffusionInputs {
        temperature: 295.15,
        field: 500.0,
        mu0: 3.2e-8,
        mu_l: 0.5e-8,
        gamma: 6000.0,
        percent: 1.0,
    };
    DiffusionModel::new(inputs, PolymerConstants::default(), 2000.0).unwrap()
}

#[test]
fn test_every_length_has_a_regime_and_positive_coefficient() {
    let model = model();
    for nbp in logspace_int(10.0, 1.0e6, 60).unwrap() {
        let (regime, d) = model.diffusion_coefficient(nbp as f64);
        assert_eq!(regime, model.classify(nbp as f64));
        assert!(d.is_finite() && d > 0.0, "D({} bp) = {}", nbp, d);
    }
}

#[test]
fn test_short_fragments_are_ogston_zimm() {
    let model = model();
    let limit = model.boundaries_bp().zimm_to_rouse;
    assert_eq!(model.classify(0.5 * limit), DiffusionRegime::OgstonZimm);
}

#[test]
fn test_very_long_fragments_reach_the_plateau() {
    let model = model();
    let b = model.boundaries_bp();
    let beyond = 2.0 * b.zimm_to_rouse.max(b.equil_to_accel).max(b.accel_to_plateau);
    assert_eq!(model.classify(beyond), DiffusionRegime::ReptationPlateau);
}

#[test]
fn test_broadening_grows_with_time() {
    let model = model();
    for &nbp in &[300.0, 3000.0, 30_000.0] {
        let (_, early) = model.band_broadening(nbp, 600.0);
        let (_, late) = model.band_broadening(nbp, 2400.0);
        // width ∝ sqrt(t)
        assert!((late / early - 2.0).abs() < 1e-9, "{} bp: {} vs {}", nbp, early, late);
    }
}

#[test]
fn test_summary_is_consistent() {
    let model = model();
    let summary = model.summary();
    assert!(summary.crossover.is_converged());
    assert!(summary.viscosity > 0.0 && summary.viscosity < 2e-3);
    assert_eq!(summary.pore_size, model.pore_size());
}
