//! Sample bookkeeping: aliquots, dilutions, mixing and quantity assignment

use approx::assert_relative_eq;

use gel_rs::sample::{
    assign_quantities, fill_missing_quantities, ladder, ladder_from_info, lindiv_by_length, Dilution,
    DnaFragment, Sample, LADDERS,
};
use gel_rs::units::{Amounts, Quantity};
use gel_rs::GelError;

mod common;
use common::{digest, relative_error, ul};

fn ng(v: f64) -> Quantity {
    Quantity::new(v, "ng").unwrap()
}

fn loaded(quantities: &[f64], volume_ul: f64) -> Sample<DnaFragment> {
    let lengths: Vec<u64> = (1..=quantities.len() as u64).map(|i| 1000 * i).collect();
    Sample::new(
        DnaFragment::from_lengths(&lengths),
        quantities.iter().map(|q| ng(*q)).collect(),
        ul(volume_ul),
    )
    .unwrap()
}

#[test]
fn test_aliquots_conserve_mass_and_volume() {
    let mut stock = loaded(&[100.0, 50.0], 20.0);
    let a = stock.aliquot(&ul(5.0)).unwrap();
    let b = stock.aliquot(&Quantity::new(0.005, "ml").unwrap()).unwrap();

    let total: f64 = [&stock, &a, &b]
        .iter()
        .map(|s| s.total_quantity().value_in("ng").unwrap())
        .sum();
    assert_relative_eq!(total, 150.0, max_relative = 1e-12);
    assert_relative_eq!(stock.volume().value_in("ul").unwrap(), 10.0, max_relative = 1e-12);
    // concentration is unchanged by taking aliquots
    assert!(relative_error(
        a.concentration(0).unwrap().value_in("ng/ul").unwrap(),
        stock.concentration(0).unwrap().value_in("ng/ul").unwrap()
    ) < 1e-12);
}

#[test]
fn test_aliquot_larger_than_sample_fails() {
    let mut stock = loaded(&[100.0], 10.0);
    let err = stock.aliquot(&ul(11.0)).unwrap_err();
    assert!(matches!(err, GelError::InsufficientVolume { .. }));
    // nothing was taken
    assert_relative_eq!(stock.volume().magnitude(), 10.0);
}

#[test]
fn test_aliquot_rejects_non_volume() {
    let mut stock = loaded(&[100.0], 10.0);
    assert!(matches!(stock.aliquot(&ng(1.0)), Err(GelError::Dimensionality { .. })));
}

#[test]
fn test_endless_stock_is_never_depleted() {
    let mut stock = loaded(&[100.0], 10.0).with_endless(true);
    let a = stock.aliquot(&ul(50.0)).unwrap();
    assert!(!a.is_endless());
    assert_relative_eq!(a.total_quantity().magnitude(), 500.0, max_relative = 1e-12);
    assert_relative_eq!(stock.volume().magnitude(), 10.0);
}

#[test]
fn test_divide_empties_finite_sample() {
    let mut stock = loaded(&[90.0], 9.0);
    let parts = stock.divide(3).unwrap();
    assert_eq!(parts.len(), 3);
    for part in &parts {
        assert_relative_eq!(part.volume().magnitude(), 3.0, max_relative = 1e-12);
        assert_relative_eq!(part.total_quantity().magnitude(), 30.0, max_relative = 1e-12);
    }
    assert!(stock.volume().magnitude().abs() < 1e-12);
    assert!(stock.divide(0).is_err());
}

#[test]
fn test_divided_sample_stays_consistent() {
    let mut stock = loaded(&[10.0, 20.0], 10.0);
    let parts = stock.divide(2).unwrap();
    assert_eq!(parts.len(), 2);

    let rest = stock.aliquot(&ul(0.0)).unwrap();
    assert!(rest.quantity_values().iter().all(|q| *q == 0.0));
    assert!(stock.quantity_values().iter().all(|q| *q == 0.0));
    assert!(stock.aliquot(&ul(0.5)).is_err());
    assert!(stock.quantity_values().iter().all(|q| q.is_finite()));
}

#[test]
fn test_divide_endless_gives_full_copies() {
    let mut stock = loaded(&[90.0], 9.0).with_endless(true);
    let parts = stock.divide(4).unwrap();
    assert_eq!(parts.len(), 4);
    for part in &parts {
        assert_eq!(part, &stock);
    }
}

#[test]
fn test_concentration_round_trip() {
    let sample = Sample::new(DnaFragment::from_lengths(&[1000]), vec![ng(10.0)], ul(10.0)).unwrap();
    let c = sample.concentration(0).unwrap();
    assert_relative_eq!(c.value_in("ng/ul").unwrap(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(c.value_in("mg/ml").unwrap(), 1.0, max_relative = 1e-12);
}

#[test]
fn test_linear_split_by_length() {
    let fragments = DnaFragment::from_lengths(&[500, 1000, 5000]);
    let parts = lindiv_by_length(&fragments, &ng(200.0));
    let total: f64 = parts.iter().map(|q| q.value_in("ng").unwrap()).sum();
    assert_relative_eq!(total, 200.0, max_relative = 1e-12);
    for (part, len) in parts.iter().zip([500.0, 1000.0, 5000.0]) {
        assert_relative_eq!(part.magnitude(), len / 6500.0 * 200.0, max_relative = 1e-12);
    }
}

#[test]
fn test_dilution_targets() {
    let mut by_factor = loaded(&[100.0], 10.0);
    by_factor.dilute(&Dilution::by_factor(2.5)).unwrap();
    assert_relative_eq!(by_factor.volume().value_in("ul").unwrap(), 25.0, max_relative = 1e-12);

    let mut by_conc = loaded(&[100.0, 20.0], 10.0);
    let target = Quantity::new(2.0, "ng/ul").unwrap();
    by_conc.dilute(&Dilution::to_concentration(target)).unwrap();
    assert_relative_eq!(by_conc.volume().value_in("ul").unwrap(), 50.0, max_relative = 1e-12);
    assert_relative_eq!(
        by_conc.concentration(0).unwrap().value_in("ng/ul").unwrap(),
        2.0,
        max_relative = 1e-12
    );

    // dilution never removes solvent
    let mut small = loaded(&[100.0], 10.0);
    let err = small.dilute(&Dilution::to_volume(ul(5.0))).unwrap_err();
    assert!(matches!(err, GelError::InsufficientVolume { .. }));
    assert_relative_eq!(small.volume().magnitude(), 10.0);
}

#[test]
fn test_mix_adds_matching_solutes() {
    let a = loaded(&[100.0, 50.0], 10.0);
    let b = loaded(&[10.0], 5.0);
    let mixed = (&a + &b).unwrap();
    assert_eq!(mixed.len(), 2);
    assert_relative_eq!(mixed.quantity_values()[0], 110.0);
    assert_relative_eq!(mixed.quantity_values()[1], 50.0);
    assert_relative_eq!(mixed.volume().magnitude(), 15.0);
}

#[test]
fn test_every_ladder_builds() {
    for preset in LADDERS {
        let sample = ladder(preset.name).unwrap();
        assert_eq!(sample.len(), preset.sizes.len());
        assert_relative_eq!(sample.total_quantity().magnitude(), 500.0, max_relative = 1e-9);
    }
    assert!(ladder("no such ladder").is_err());
    assert!(ladder_from_info(LADDERS[0].name, &ul(1.0), &ul(1.0)).is_err());
}

#[test]
fn test_assign_quantities_per_lane_rules() {
    let lanes = vec![
        DnaFragment::from_lengths(&[1000, 3000]),
        DnaFragment::from_lengths(&[500, 2000]),
        DnaFragment::from_lengths(&[1000, 4000]),
    ];
    let quantities = vec![
        Some(Amounts::Scalar(ng(200.0))),
        Some(Amounts::Sequence(vec![ng(10.0), ng(40.0)])),
        None,
    ];
    let out = assign_quantities(&lanes, &quantities, &ng(150.0)).unwrap();

    assert_relative_eq!(out[0][0].magnitude(), 50.0, max_relative = 1e-12);
    assert_relative_eq!(out[0][1].magnitude(), 150.0, max_relative = 1e-12);
    assert_relative_eq!(out[1][1].magnitude(), 40.0);
    // the largest assigned quantity (150 ng) goes to the longest fragment
    assert_relative_eq!(out[2][1].magnitude(), 150.0, max_relative = 1e-12);
    assert_relative_eq!(out[2][0].magnitude(), 37.5, max_relative = 1e-12);
}

#[test]
fn test_fill_missing_keeps_known_quantities() {
    let known = loaded(&[60.0, 80.0], 10.0);
    let unknown = digest(&[1000, 2000], 10.0);
    let out = fill_missing_quantities(&[known, unknown], &ng(150.0)).unwrap();

    assert_relative_eq!(out[0][0].magnitude(), 60.0);
    assert_relative_eq!(out[0][1].magnitude(), 80.0);
    assert!(out[1].iter().all(|q| q.magnitude().is_finite() && q.magnitude() > 0.0));
}

#[test]
fn test_sample_summary() {
    let sample = loaded(&[40.0, 20.0], 10.0);
    assert_eq!(sample.summary(), "<sample: vol=10 ul, 2 solutes (60 ng)>");
}
