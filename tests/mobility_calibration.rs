//! Mobility interpolation, vWBR fitting and Ferguson extrapolation
//! against built-in and synthetic calibration data

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gel_rs::calibration::{CalibrationStore, DatasetName};
use gel_rs::ferguson::ferguson_to_mu0;
use gel_rs::gel::linspace;
use gel_rs::mobility::{InterpolationMethod, MobilityModel, VwbrParams};
use gel_rs::GelError;

mod common;
use common::{assert_non_increasing, init_logging, scaled_store, uniform_triple, SCALE_RATE};

fn builtin_model(method: InterpolationMethod, replace_nans: bool) -> MobilityModel {
    let store = CalibrationStore::builtin();
    MobilityModel::new(store.get(DatasetName::Vertical).unwrap(), method, replace_nans)
}

#[test]
fn test_vwbr_relation_is_monotone_for_ordered_triples() {
    let mut rng = StdRng::seed_from_u64(42);
    let lengths: Vec<f64> = (0..200).map(|i| 10.0 * 1.06_f64.powi(i)).collect();

    for _ in 0..200 {
        let mu_s = rng.gen_range(1e-5..1e-3);
        let mu_l = mu_s * rng.gen_range(0.01..=1.0);
        let gamma = rng.gen_range(100.0..50_000.0);
        let params = VwbrParams::new(mu_s, mu_l, gamma);
        let curve = params.mobilities(&lengths);
        assert_non_increasing(&curve, 1e-14, &format!("{:?}", params));
    }
}

#[test]
fn test_mobility_never_increases_with_length_inside_hull() {
    init_logging();
    let model = builtin_model(InterpolationMethod::Linear, true);
    let lengths: Vec<f64> = [100.0, 300.0, 1000.0, 3000.0, 10_000.0, 30_000.0].to_vec();
    let mut rng = StdRng::seed_from_u64(0x6e1);

    for _ in 0..25 {
        let field = rng.gen_range(1.3..4.9);
        let percent = rng.gen_range(0.5..1.2);
        let curve = model.mobility_curve_at(field, percent, &lengths).unwrap();
        assert!(curve.iter().all(|mu| mu.is_finite() && *mu > 0.0));
        assert_non_increasing(&curve, 1e-12, &format!("E={:.2} V/cm, {:.2} %", field, percent));
    }
}

#[test]
fn test_nearest_method_is_defined_everywhere() {
    let model = builtin_model(InterpolationMethod::Nearest, false);
    let mu = model.mobility_at(1000.0, 25.0, 3.0).unwrap();
    assert!(mu > 0.0);
}

#[test]
fn test_outside_hull_without_replacement_is_undefined() {
    let model = builtin_model(InterpolationMethod::Linear, false);
    let err = model.mobility_at(1000.0, 25.0, 1.0).unwrap_err();
    assert!(matches!(err, GelError::InterpolationUndefined { .. }));
}

#[test]
fn test_outside_hull_with_replacement_falls_back() {
    let model = builtin_model(InterpolationMethod::Linear, true);
    let nearest = builtin_model(InterpolationMethod::Nearest, false);
    let a = model.mobility_at(1000.0, 25.0, 1.0).unwrap();
    let b = nearest.mobility_at(1000.0, 25.0, 1.0).unwrap();
    assert_relative_eq!(a, b);
}

#[test]
fn test_fit_is_deterministic_at_one_volt_per_cm() {
    init_logging();
    let model = builtin_model(InterpolationMethod::Linear, true);
    let lengths = linspace(100.0, 20_000.0, 100);

    let first = model.fit_transport_params(1.0, 1.0, &lengths).unwrap();
    let second = model.fit_transport_params(1.0, 1.0, &lengths).unwrap();
    assert_eq!(first.params, second.params);
    assert_eq!(first.iterations, second.iterations);
    assert!(first.params.mu_s > 0.0);
    assert!(first.residual_sum_squares.is_finite());
}

#[test]
fn test_fit_recovers_synthetic_triple() {
    let store = scaled_store();
    let model = MobilityModel::new(store.get(DatasetName::Vertical).unwrap(), InterpolationMethod::Linear, true);
    let fit = model
        .fit_transport_params(5.0, 1.0, &linspace(100.0, 50_000.0, 100))
        .unwrap();

    let k = (-SCALE_RATE).exp();
    let base = uniform_triple();
    assert!(fit.converged, "{}", fit.message);
    assert_relative_eq!(fit.params.mu_s, base.mu_s * k, max_relative = 1e-4);
    assert_relative_eq!(fit.params.mu_l, base.mu_l * k, max_relative = 1e-4);
    assert_relative_eq!(fit.params.gamma, base.gamma, max_relative = 1e-3);
}

#[test]
fn test_ferguson_intercept_on_synthetic_data() {
    let store = scaled_store();
    let set = store.get(DatasetName::Vertical).unwrap();
    let model = MobilityModel::new(set, InterpolationMethod::Linear, true);
    let lengths = [100.0, 500.0, 2000.0];

    let result = ferguson_to_mu0(&model, 5.0, &set.distinct_percents(), &lengths).unwrap();
    assert_eq!(result.lines.len(), 3);
    assert!(result.excluded.is_empty());
    for line in &result.lines {
        assert_relative_eq!(line.fit.slope, -SCALE_RATE, max_relative = 1e-9);
    }

    let base = uniform_triple();
    let mean_ln = lengths.iter().map(|&l| base.mobility(l).ln()).sum::<f64>() / lengths.len() as f64;
    assert_relative_eq!(result.require_mu0().unwrap(), mean_ln.exp(), max_relative = 1e-9);
}

#[test]
fn test_ferguson_without_usable_lengths() {
    let model = builtin_model(InterpolationMethod::Linear, false);
    // a single strength gives one point per length
    let result = ferguson_to_mu0(&model, 5.0, &[1.0], &[500.0, 1000.0]).unwrap();
    assert!(result.lines.is_empty());
    assert_eq!(result.excluded, vec![500.0, 1000.0]);
    assert!(matches!(result.require_mu0(), Err(GelError::FreeSolutionUndefined { .. })));
}
