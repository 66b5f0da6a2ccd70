//! Calibration store: reference vWBR triples over the (field, %agarose) plane
//!
//! A [`CalibrationSet`] is a list of measured conditions, each carrying the
//! vWBR parameters fitted at that condition. The [`CalibrationStore`] maps a
//! [`DatasetName`] to its set.
//!
//! The built-in store holds the two published tables (horizontal and vertical
//! slab gels). It is parsed once per process and shared read-only; anything
//! that needs calibration data takes a store explicitly, so tests can inject
//! synthetic sets built with [`CalibrationSet::new`].
//!
//! # Units after loading
//!
//! - field: V/cm
//! - percent: % agarose (w/v)
//! - `mu_s`, `mu_l`: cm²/(V·s)
//! - `gamma`: bp

pub(crate) mod data;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::error::{GelError, Result};
use crate::mobility::VwbrParams;

// =================================================================================================
// Calibration point
// =================================================================================================

/// One calibrated condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    /// Electric field \[V/cm\]
    pub field: f64,
    /// Agarose concentration \[%\]
    pub percent: f64,
    /// Short-fragment mobility limit \[cm²/(V·s)\]
    pub mu_s: f64,
    /// Long-fragment mobility limit \[cm²/(V·s)\]
    pub mu_l: f64,
    /// Crossover length \[bp\]
    pub gamma: f64,
    /// Fragment-length window the triple was fitted on \[bp\], if known
    pub length_window: Option<(f64, f64)>,
    /// Goodness of fit (R²) of the triple, if known
    pub goodness_of_fit: Option<f64>,
    /// Upper length \[bp\] and goodness of fit of a refit on a shorter window
    pub refit: Option<(f64, f64)>,
}

impl CalibrationPoint {
    pub fn new(field: f64, percent: f64, mu_s: f64, mu_l: f64, gamma: f64) -> Self {
        Self {
            field,
            percent,
            mu_s,
            mu_l,
            gamma,
            length_window: None,
            goodness_of_fit: None,
            refit: None,
        }
    }

    pub fn vwbr(&self) -> VwbrParams {
        VwbrParams::new(self.mu_s, self.mu_l, self.gamma)
    }

    /// Position in the interpolation plane
    pub fn coordinates(&self) -> [f64; 2] {
        [self.field, self.percent]
    }

    fn from_row(row: &data::Row) -> Self {
        Self {
            field: row.field,
            percent: row.percent,
            mu_s: row.mu_s * data::MOBILITY_SCALE,
            mu_l: row.mu_l * data::MOBILITY_SCALE,
            gamma: row.gamma * data::GAMMA_SCALE,
            length_window: Some((row.min_length as f64, row.max_length as f64)),
            goodness_of_fit: Some(row.chi2),
            refit: row
                .refit_max_length
                .zip(row.refit_chi2)
                .map(|(max_length, chi2)| (max_length as f64, chi2)),
        }
    }
}

// =================================================================================================
// Dataset names
// =================================================================================================

/// Which reference table to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DatasetName {
    Horizontal,
    #[default]
    Vertical,
}

impl DatasetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::Horizontal => "horizontal",
            DatasetName::Vertical => "vertical",
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetName {
    type Err = GelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(DatasetName::Horizontal),
            "vertical" => Ok(DatasetName::Vertical),
            other => Err(GelError::invalid(format!(
                "unknown calibration dataset '{}' (expected 'horizontal' or 'vertical')",
                other
            ))),
        }
    }
}

// =================================================================================================
// Calibration set
// =================================================================================================

/// A validated list of calibration points
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSet {
    points: Vec<CalibrationPoint>,
}

impl CalibrationSet {
    /// Build a set from points
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `points` is empty or any coordinate is not finite.
    /// The vWBR triples themselves are not checked: published fits contain
    /// near-zero `mu_l` values and very large `gamma` values.
    pub fn new(points: Vec<CalibrationPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(GelError::invalid("calibration set has no points"));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !p.field.is_finite() || !p.percent.is_finite())
        {
            return Err(GelError::invalid(format!(
                "calibration point has non-finite coordinates ({}, {})",
                bad.field, bad.percent
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sorted distinct agarose percentages
    pub fn distinct_percents(&self) -> Vec<f64> {
        distinct(self.points.iter().map(|p| p.percent))
    }

    /// Sorted distinct fields \[V/cm\]
    pub fn distinct_fields(&self) -> Vec<f64> {
        distinct(self.points.iter().map(|p| p.field))
    }
}

fn distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

// =================================================================================================
// Store
// =================================================================================================

/// Named calibration sets
#[derive(Debug, Clone, Default)]
pub struct CalibrationStore {
    sets: BTreeMap<DatasetName, CalibrationSet>,
}

static BUILTIN: OnceLock<Arc<CalibrationStore>> = OnceLock::new();

impl CalibrationStore {
    /// Store holding the given sets
    pub fn new(sets: impl IntoIterator<Item = (DatasetName, CalibrationSet)>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
        }
    }

    /// The built-in horizontal and vertical tables, loaded on first use
    pub fn builtin() -> Arc<CalibrationStore> {
        BUILTIN
            .get_or_init(|| {
                let load = |rows: &[data::Row]| CalibrationSet {
                    points: rows.iter().map(CalibrationPoint::from_row).collect(),
                };
                Arc::new(CalibrationStore::new([
                    (DatasetName::Horizontal, load(data::HORIZONTAL)),
                    (DatasetName::Vertical, load(data::VERTICAL)),
                ]))
            })
            .clone()
    }

    pub fn insert(&mut self, name: DatasetName, set: CalibrationSet) {
        self.sets.insert(name, set);
    }

    /// # Errors
    ///
    /// `InvalidInput` if the store has no set under `name`.
    pub fn get(&self, name: DatasetName) -> Result<&CalibrationSet> {
        self.sets
            .get(&name)
            .ok_or_else(|| GelError::invalid(format!("calibration dataset '{}' not loaded", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = DatasetName> + '_ {
        self.sets.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_row_counts() {
        let store = CalibrationStore::builtin();
        assert_eq!(store.get(DatasetName::Horizontal).unwrap().len(), 49);
        assert_eq!(store.get(DatasetName::Vertical).unwrap().len(), 40);
    }

    #[test]
    fn test_builtin_units_converted() {
        let store = CalibrationStore::builtin();
        let first = store.get(DatasetName::Horizontal).unwrap().points()[0];
        assert_relative_eq!(first.field, 0.71);
        assert_relative_eq!(first.percent, 0.5);
        assert_relative_eq!(first.mu_s, 2.61e-4, max_relative = 1e-12);
        assert_relative_eq!(first.mu_l, 0.42e-4, max_relative = 1e-12);
        assert_relative_eq!(first.gamma, 29_700.0, max_relative = 1e-12);
        assert_eq!(first.length_window, Some((1000.0, 35000.0)));
        assert_eq!(first.goodness_of_fit, Some(0.9999));
        assert_eq!(first.refit, None);

        let refitted = store.get(DatasetName::Horizontal).unwrap().points()[1];
        assert_eq!(refitted.refit, Some((5000.0, 0.9992)));
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = CalibrationStore::builtin();
        let b = CalibrationStore::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_vertical_distinct_percents() {
        let store = CalibrationStore::builtin();
        let percents = store.get(DatasetName::Vertical).unwrap().distinct_percents();
        assert_eq!(percents, vec![0.4, 0.7, 1.0, 1.3]);
    }

    #[test]
    fn test_dataset_name_parsing() {
        assert_eq!("Horizontal".parse::<DatasetName>().unwrap(), DatasetName::Horizontal);
        assert_eq!(" vertical ".parse::<DatasetName>().unwrap(), DatasetName::Vertical);
        assert!("diagonal".parse::<DatasetName>().is_err());
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(CalibrationSet::new(vec![]).is_err());
    }

    #[test]
    fn test_missing_dataset() {
        let store = CalibrationStore::default();
        assert!(matches!(store.get(DatasetName::Vertical), Err(GelError::InvalidInput(_))));
    }
}
