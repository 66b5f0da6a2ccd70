//! Gaussian band profiles and intensity normalisation
//!
//! A band is a Gaussian whose area is the DNA quantity. Its peak height
//! follows from the standard deviation, which follows from the band width
//! read as a full width at half maximum (or tenth maximum).

use std::f64::consts::{LN_10, LN_2, PI};

/// FWHM of a Gaussian with the given full width at tenth maximum
pub fn fwhm_from_fwtm(fwtm: f64) -> f64 {
    fwtm * (2.0 * LN_2).sqrt() / (2.0 * LN_10).sqrt()
}

/// Standard deviation of a Gaussian with the given FWHM
pub fn std_dev_from_fwhm(fwhm: f64) -> f64 {
    fwhm / (2.0 * (2.0 * LN_2).sqrt())
}

/// Peak height of a Gaussian with area `area` and standard deviation `dev`
pub fn peak_height(area: f64, dev: f64) -> f64 {
    area / (dev * (2.0 * PI).sqrt())
}

/// Gaussian profile value at `x`
pub fn gaussian(x: f64, height: f64, center: f64, dev: f64) -> f64 {
    height * (-(x - center).powi(2) / (2.0 * dev * dev)).exp()
}

/// Raw peak intensity of a band of `quantity` spread over `width`
pub fn raw_intensity(quantity: f64, width: f64, fwtm: bool) -> f64 {
    let fwhm = if fwtm { fwhm_from_fwtm(width) } else { width };
    peak_height(quantity, std_dev_from_fwhm(fwhm))
}

/// Normalise raw intensities against the exposure-dependent saturation level
///
/// `satI = maxI + exposure · (minI − maxI)`, so exposure 0 maps the brightest
/// band to 1 and exposure 1 maps the faintest band to 1. Non-finite raw
/// values are ignored when locating the extremes.
pub fn normalize(raw: &[Vec<f64>], exposure: f64) -> Vec<Vec<f64>> {
    let finite = raw.iter().flatten().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let saturation = max + exposure * (min - max);
    raw.iter()
        .map(|lane| lane.iter().map(|v| v / saturation).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fwhm_definition() {
        let dev = std_dev_from_fwhm(1.0);
        assert_relative_eq!(gaussian(0.5, 1.0, 0.0, dev), 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_fwtm_definition() {
        let dev = std_dev_from_fwhm(fwhm_from_fwtm(1.0));
        assert_relative_eq!(gaussian(0.5, 1.0, 0.0, dev), 0.1, max_relative = 1e-12);
    }

    #[test]
    fn test_peak_height_unit_area() {
        assert_relative_eq!(peak_height(1.0, 1.0), 1.0 / (2.0 * PI).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_normalize_exposure_extremes() {
        let raw = vec![vec![2.0, 4.0], vec![8.0]];
        let dark = normalize(&raw, 0.0);
        assert_relative_eq!(dark[1][0], 1.0);
        assert_relative_eq!(dark[0][0], 0.25);
        let bright = normalize(&raw, 1.0);
        assert_relative_eq!(bright[0][0], 1.0);
        assert_relative_eq!(bright[1][0], 4.0);
    }
}
