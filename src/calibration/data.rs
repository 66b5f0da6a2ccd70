//! Built-in vWBR calibration tables for agarose gels
//!
//! Each row records the conditions of one published measurement series
//! (field `E`, agarose concentration `%T`, the fragment-length window of the fit)
//! and the fitted vWBR parameters with their goodness of fit.
//!
//! Raw table units:
//!
//! | Column        | Unit            |
//! |---------------|-----------------|
//! | `field`       | V/cm            |
//! | `percent`     | % (w/v)         |
//! | `mu_s`,`mu_l` | 1E-8 m²/(V·s)   |
//! | `gamma`       | kbp             |
//!
//! `refit_max_length` and `refit_chi2` are present only for series that were
//! refitted on a shorter length window.

/// One raw calibration row
#[derive(Debug, Clone, Copy)]
pub(crate) struct Row {
    pub field: f64,
    pub percent: f64,
    pub max_length: u32,
    pub min_length: u32,
    pub mu_s: f64,
    pub mu_l: f64,
    pub gamma: f64,
    pub chi2: f64,
    pub refit_max_length: Option<u32>,
    pub refit_chi2: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    field: f64,
    percent: f64,
    max_length: u32,
    min_length: u32,
    mu_s: f64,
    mu_l: f64,
    gamma: f64,
    chi2: f64,
    refit_max_length: Option<u32>,
    refit_chi2: Option<f64>,
) -> Row {
    Row {
        field,
        percent,
        max_length,
        min_length,
        mu_s,
        mu_l,
        gamma,
        chi2,
        refit_max_length,
        refit_chi2,
    }
}

/// Scale from the table's 1E-8 m²/(V·s) to cm²/(V·s)
pub(crate) const MOBILITY_SCALE: f64 = 1e-4;

/// Scale from the table's kbp to bp
pub(crate) const GAMMA_SCALE: f64 = 1e3;

/// Horizontal-slab measurements
pub(crate) const HORIZONTAL: &[Row] = &[
    row(0.71, 0.5, 35000, 1000, 2.61, 0.42, 29.7, 0.9999, None, None),
    row(0.71, 1.0, 20000, 300, 2.54, 1.64e-7, 28100000.0, 0.9981, Some(5000), Some(0.9992)),
    row(0.71, 1.3, 20000, 200, 2.49, 2.6e-9, 1060000000.0, 0.9647, Some(2600), Some(0.999)),
    row(1.0, 1.0, 48502, 400, 2.37, 0.23, 29.99, 0.9997, None, None),
    row(1.0, 1.1, 30000, 200, 2.21, 0.05, 74.08, 0.9987, Some(25000), Some(0.9991)),
    row(1.0, 1.2, 27500, 200, 2.14, 0.01, 144.4, 0.9964, Some(1300), Some(0.999)),
    row(1.23, 0.7, 47500, 1000, 2.6, 0.66, 19.86, 0.9997, None, None),
    row(1.23, 0.8, 35000, 200, 2.55, 0.23, 23.84, 0.9988, Some(27500), Some(0.999)),
    row(1.23, 0.9, 25000, 200, 2.44, 0.08, 49.58, 0.9971, Some(3000), Some(0.9992)),
    row(1.31, 0.5, 35000, 400, 2.54, 0.39, 19.69, 0.9999, None, None),
    row(1.31, 1.0, 25000, 200, 2.52, 0.15, 25.75, 0.9986, Some(17500), Some(0.9992)),
    row(1.31, 1.3, 48502, 200, 2.48, 0.05, 46.75, 0.9967, Some(14000), Some(0.9991)),
    row(1.51, 1.0, 35000, 200, 2.24, 0.29, 17.86, 0.9997, None, None),
    row(1.51, 1.1, 32500, 300, 2.26, 0.14, 23.78, 0.998, Some(20000), Some(0.9989)),
    row(1.51, 1.2, 48502, 200, 2.17, 0.04, 64.31, 0.9974, Some(15000), Some(0.9991)),
    row(1.8, 0.5, 47500, 300, 2.48, 0.51, 17.23, 0.9998, None, None),
    row(1.8, 1.3, 30000, 200, 2.39, 0.22, 11.93, 0.998, Some(13000), Some(0.9991)),
    row(2.0, 1.0, 48502, 200, 2.22, 0.23, 13.96, 0.9982, Some(20000), Some(0.9992)),
    row(2.0, 1.1, 48502, 200, 2.24, 0.16, 13.06, 0.9971, Some(10000), Some(0.9991)),
    row(2.0, 1.2, 17500, 200, 2.15, 0.07, 30.99, 0.9979, Some(10000), Some(0.999)),
    row(2.22, 0.5, 35000, 300, 2.68, 0.65, 12.9, 0.9995, None, None),
    row(2.22, 1.0, 35000, 200, 2.64, 0.43, 9.56, 0.9994, None, None),
    row(2.22, 1.3, 32500, 200, 2.56, 0.29, 8.42, 0.9981, Some(17500), Some(0.9991)),
    row(2.47, 0.7, 32500, 200, 2.59, 0.51, 9.5, 0.9997, None, None),
    row(2.47, 0.8, 35000, 500, 2.64, 0.47, 8.77, 0.9998, None, None),
    row(2.47, 0.9, 48502, 200, 2.57, 0.39, 8.98, 0.9992, None, None),
    row(2.51, 0.7, 35000, 200, 2.44, 0.45, 14.19, 0.9999, None, None),
    row(2.51, 0.8, 35000, 200, 2.44, 0.39, 12.41, 0.9996, None, None),
    row(2.51, 0.9, 48502, 200, 2.43, 0.27, 11.03, 0.9986, Some(15000), Some(0.9991)),
    row(2.78, 0.5, 10000, 200, 3.32, 0.92, 9.3, 0.9999, None, None),
    row(2.78, 0.6, 10000, 200, 3.25, 0.8, 8.47, 1.0, None, None),
    row(2.78, 0.7, 10000, 200, 3.18, 0.66, 9.8, 0.9998, None, None),
    row(2.78, 0.8, 10000, 200, 3.06, 0.55, 9.84, 0.9997, None, None),
    row(2.78, 0.9, 10000, 200, 2.93, 0.46, 9.64, 0.9997, None, None),
    row(2.78, 1.0, 10000, 200, 2.93, 0.39, 10.4, 0.9997, None, None),
    row(2.78, 1.1, 10000, 200, 2.93, 0.33, 10.35, 0.9993, None, None),
    row(2.78, 1.2, 10000, 200, 2.85, 0.3, 10.82, 0.9995, None, None),
    row(2.78, 1.3, 10000, 200, 2.84, 0.25, 11.14, 0.9996, None, None),
    row(2.78, 1.4, 10000, 200, 2.79, 0.22, 11.52, 0.9994, None, None),
    row(2.78, 1.5, 10000, 200, 2.7, 0.19, 11.63, 0.9993, None, None),
    row(3.1, 1.0, 32500, 200, 2.65, 0.58, 8.61, 0.9999, None, None),
    row(3.1, 1.1, 30000, 200, 2.62, 0.55, 7.99, 0.9998, None, None),
    row(3.1, 1.2, 27500, 200, 2.56, 0.33, 6.06, 0.998, Some(5000), Some(0.9994)),
    row(3.51, 0.5, 35000, 900, 2.58, 0.75, 13.34, 0.9993, None, None),
    row(3.51, 1.0, 48502, 200, 2.58, 0.52, 6.82, 0.9997, None, None),
    row(3.51, 1.3, 25000, 200, 2.51, 0.38, 6.05, 0.9989, Some(8000), Some(0.999)),
    row(5.0, 0.5, 22500, 1000, 2.53, 0.75, 18.15, 0.9996, None, None),
    row(5.0, 1.0, 20000, 400, 2.55, 0.67, 5.78, 0.9995, None, None),
    row(5.0, 1.3, 17500, 200, 2.51, 0.5, 4.22, 0.9995, None, None),
];

/// Vertical-slab measurements
pub(crate) const VERTICAL: &[Row] = &[
    row(0.62, 0.4, 48502, 1000, 2.67, 0.21, 52.799, 0.9993, None, None),
    row(0.93, 0.4, 194000, 1000, 2.54, 0.34, 25.304, 0.9992, None, None),
    row(1.24, 0.4, 48502, 200, 3.67, 0.81, 14.922, 0.9997, None, None),
    row(1.55, 0.4, 194000, 200, 3.18, 0.77, 14.488, 0.9992, None, None),
    row(1.86, 0.4, 194000, 200, 3.12, 0.78, 12.603, 0.999, None, None),
    row(2.17, 0.4, 194000, 200, 3.07, 0.89, 11.911, 0.9971, Some(17500), Some(0.9992)),
    row(2.48, 0.4, 194000, 200, 3.13, 0.9, 12.648, 0.9979, Some(15000), Some(0.9991)),
    row(3.1, 0.4, 194000, 200, 3.14, 0.98, 9.423, 0.9964, Some(12000), Some(0.9991)),
    row(4.97, 0.4, 194000, 200, 3.34, 1.22, 9.63, 0.9983, Some(8000), Some(0.999)),
    row(6.21, 0.4, 194000, 200, 3.11, 1.2, 9.214, 0.9959, Some(4400), Some(0.9993)),
    row(0.62, 0.7, 48502, 200, 2.86, 8.36e-6, 732000.0, 0.9973, Some(2700), Some(0.999)),
    row(0.93, 0.7, 194000, 200, 2.38, 0.09, 54.264, 0.9968, Some(25000), Some(0.999)),
    row(1.24, 0.7, 48502, 200, 3.71, 0.49, 15.255, 0.9993, None, None),
    row(1.55, 0.7, 194000, 200, 3.61, 0.53, 13.125, 0.9994, None, None),
    row(1.86, 0.7, 47500, 300, 3.61, 0.62, 9.834, 0.9997, None, None),
    row(2.17, 0.7, 194000, 200, 3.07, 0.55, 10.151, 0.9998, None, None),
    row(2.48, 0.7, 194000, 200, 3.42, 0.72, 9.036, 0.9997, None, None),
    row(3.1, 0.7, 194000, 200, 3.14, 0.69, 7.713, 0.9996, None, None),
    row(4.97, 0.7, 194000, 200, 3.08, 0.93, 6.188, 0.9984, Some(15000), Some(0.999)),
    row(6.21, 0.7, 194000, 200, 3.24, 1.03, 6.371, 0.9987, Some(10000), Some(0.9991)),
    row(0.62, 1.0, 48502, 200, 2.48, 1.82e-14, 183000000000000.0, 0.9938, Some(2900), Some(0.999)),
    row(0.93, 1.0, 194000, 300, 2.41, 1.37e-13, 23300000000000.0, 0.9947, Some(2900), Some(0.999)),
    row(1.24, 1.0, 48502, 200, 3.34, 0.17, 25.855, 0.9974, Some(14000), Some(0.999)),
    row(1.55, 1.0, 47500, 200, 3.25, 0.33, 12.773, 0.9977, Some(14000), Some(0.999)),
    row(1.86, 1.0, 47500, 400, 3.69, 0.47, 8.502, 0.9984, Some(10000), Some(0.9991)),
    row(2.17, 1.0, 194000, 200, 2.87, 0.38, 9.372, 0.9989, Some(15000), Some(0.999)),
    row(2.48, 1.0, 194000, 200, 3.39, 0.52, 7.209, 0.999, None, None),
    row(3.1, 1.0, 19400, 300, 3.36, 0.61, 5.852, 0.9994, None, None),
    row(4.97, 1.0, 48502, 200, 3.04, 0.77, 4.749, 0.9989, Some(48502), Some(0.9991)),
    row(6.21, 1.0, 194000, 200, 3.13, 0.88, 4.417, 0.9975, Some(12500), Some(0.9991)),
    row(0.62, 1.3, 48502, 200, 2.12, 1.87e-10, 11100000000.0, 0.9904, Some(1800), Some(0.9991)),
    row(0.93, 1.3, 194000, 300, 1.96, 3.8e-6, 610000.0, 0.9928, Some(2600), Some(0.9992)),
    row(1.24, 1.3, 48502, 300, 3.32, 0.02, 179.189, 0.9967, Some(2600), Some(0.9991)),
    row(1.55, 1.3, 194000, 200, 3.47, 0.27, 11.92, 0.9958, Some(9000), Some(0.999)),
    row(1.86, 1.3, 47500, 400, 3.97, 0.36, 8.594, 0.997, Some(7000), Some(0.9991)),
    row(2.17, 1.3, 194000, 200, 2.76, 0.21, 12.412, 0.9966, Some(10000), Some(0.999)),
    row(2.48, 1.3, 194000, 200, 3.26, 0.45, 7.464, 0.9985, Some(11000), Some(0.999)),
    row(3.1, 1.3, 47500, 200, 3.37, 0.5, 5.159, 0.9984, Some(6000), Some(0.9992)),
    row(4.97, 1.3, 48502, 200, 2.68, 0.49, 4.048, 0.9983, Some(4000), Some(0.9993)),
    row(6.21, 1.3, 194000, 200, 2.7, 0.59, 3.555, 0.9991, None, None),
];
