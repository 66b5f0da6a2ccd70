//! Helper functions for integration tests

use gel_rs::sample::{DnaFragment, Sample};
use gel_rs::units::Quantity;

/// Route `log` records to the test output; repeated calls are harmless
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn ul(v: f64) -> Quantity {
    Quantity::new(v, "ul").unwrap()
}

/// A digest of `lengths` with unknown quantities in `volume_ul` µl
pub fn digest(lengths: &[u64], volume_ul: f64) -> Sample<DnaFragment> {
    Sample::new(DnaFragment::from_lengths(lengths), vec![], ul(volume_ul)).unwrap()
}

/// Relative error |a - b| / |b|
pub fn relative_error(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        a.abs()
    } else {
        ((a - b) / b).abs()
    }
}

/// Assert `values` never increase, allowing `tolerance` of relative slack
pub fn assert_non_increasing(values: &[f64], tolerance: f64, message: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] <= pair[0] * (1.0 + tolerance),
            "{}: value {} ({}) exceeds value {} ({})",
            message,
            i + 1,
            pair[1],
            i,
            pair[0]
        );
    }
}
