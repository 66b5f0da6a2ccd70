//! Assigning DNA quantities to fragments
//!
//! These helpers assume the mass of a fragment is proportional to its
//! length, as for the products of a restriction digest: the longest
//! fragment of a lane carries the reference quantity and shorter ones a
//! proportional share.

use crate::error::{GelError, Result};
use crate::sample::{Fragment, Sample};
use crate::units::{Amounts, Dimension, Quantity, Unit};

/// Unit of every quantity returned by this module
pub const QUANTITY_UNIT: &str = "ng";

/// Reference quantity for the longest fragment when nothing else is known
pub const DEFAULT_MAX_QUANTITY_NG: f64 = 150.0;

/// Split `total` over `items` in proportion to `criterion(item)`
///
/// ```rust
/// use gel_rs::sample::lindiv_quantity;
/// use gel_rs::units::Quantity;
///
/// let lengths = [500.0, 1000.0, 5000.0];
/// let shares = lindiv_quantity(&lengths, &Quantity::new(200.0, "ng").unwrap(), |l| *l);
/// let sum: f64 = shares.iter().map(|q| q.magnitude()).sum();
/// assert!((sum - 200.0).abs() < 1e-9);
/// ```
pub fn lindiv_quantity<T>(items: &[T], total: &Quantity, criterion: impl Fn(&T) -> f64) -> Vec<Quantity> {
    let weights: Vec<f64> = items.iter().map(criterion).collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| total.scale(w / sum)).collect()
}

/// [`lindiv_quantity`] with fragment length as the criterion
pub fn lindiv_by_length<F: Fragment>(fragments: &[F], total: &Quantity) -> Vec<Quantity> {
    lindiv_quantity(fragments, total, |f| f.length_bp())
}

fn extrapolate(lengths: &[f64], max_quantity: f64) -> Vec<f64> {
    let max_length = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    lengths.iter().map(|l| l * max_quantity / max_length).collect()
}

fn largest(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

fn reference_quantity(found: Option<f64>, default_max: &Quantity, unit: &Unit) -> Result<f64> {
    match found {
        Some(q) if q > 0.0 => Ok(q),
        _ => {
            default_max.expect_dimension(Dimension::MASS, "default maximum quantity")?;
            Ok(default_max.to_unit(unit)?.magnitude())
        }
    }
}

fn into_quantities(values: Vec<f64>, unit: &Unit) -> Vec<Quantity> {
    values
        .into_iter()
        .map(|v| Quantity::with_unit(v, unit.clone()))
        .collect()
}

/// Quantities for every fragment of every lane
///
/// Per lane, `quantities[i]` decides:
///
/// - `Some(Scalar(q))`: `q` is split over the lane in proportion to length
/// - `Some(Sequence(v))` with one entry per fragment: used as given
/// - anything else: extrapolated linearly from the largest quantity assigned
///   in the other lanes (or `default_max` if none), which the longest
///   fragment of the lane receives
///
/// All results are in ng.
///
/// # Errors
///
/// `Dimensionality` if a given quantity or `default_max` is not a mass.
pub fn assign_quantities<F: Fragment>(
    lanes: &[Vec<F>],
    quantities: &[Option<Amounts>],
    default_max: &Quantity,
) -> Result<Vec<Vec<Quantity>>> {
    let unit = Unit::parse(QUANTITY_UNIT)?;
    let mut assigned: Vec<Option<Vec<f64>>> = Vec::with_capacity(lanes.len());
    let mut max_quantity: Option<f64> = None;

    for (i, lane) in lanes.iter().enumerate() {
        let values = match quantities.get(i).and_then(Option::as_ref) {
            Some(Amounts::Scalar(total)) => {
                total.expect_dimension(Dimension::MASS, "lane quantity")?;
                let total = total.to_unit(&unit)?;
                Some(
                    lindiv_by_length(lane, &total)
                        .iter()
                        .map(Quantity::magnitude)
                        .collect::<Vec<_>>(),
                )
            }
            Some(Amounts::Sequence(v)) if v.len() == lane.len() => {
                let values = v
                    .iter()
                    .map(|q| -> Result<f64> {
                        q.expect_dimension(Dimension::MASS, "fragment quantity")?;
                        Ok(q.to_unit(&unit)?.magnitude())
                    })
                    .collect::<Result<Vec<f64>>>()?;
                Some(values)
            }
            _ => None,
        };
        if let Some(values) = &values
            && let Some(m) = largest(values)
        {
            max_quantity = Some(max_quantity.map_or(m, |a| a.max(m)));
        }
        assigned.push(values);
    }

    let reference = reference_quantity(max_quantity, default_max, &unit)?;
    Ok(lanes
        .iter()
        .zip(assigned)
        .map(|(lane, values)| {
            let values = values.unwrap_or_else(|| {
                let lengths: Vec<f64> = lane.iter().map(Fragment::length_bp).collect();
                extrapolate(&lengths, reference)
            });
            into_quantities(values, &unit)
        })
        .collect())
}

/// Fill the unassigned (`NaN`) quantities of each sample
///
/// Known quantities are kept. The reference for the missing ones is the
/// largest known quantity across all samples (or `default_max`), given to a
/// fragment as long as the longest one in its own sample.
///
/// # Errors
///
/// `Dimensionality` if a sample holds amounts of substance rather than masses.
pub fn fill_missing_quantities<F: Fragment + Clone + PartialEq>(
    samples: &[Sample<F>],
    default_max: &Quantity,
) -> Result<Vec<Vec<Quantity>>> {
    let unit = Unit::parse(QUANTITY_UNIT)?;
    let known: Vec<Vec<f64>> = samples
        .iter()
        .map(|s| -> Result<Vec<f64>> {
            let factor = s.quantity_unit().conversion_factor(&unit)?;
            Ok(s.quantity_values().iter().map(|q| q * factor).collect())
        })
        .collect::<Result<_>>()?;

    let found = known
        .iter()
        .filter_map(|values| largest(values))
        .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))));
    let reference = reference_quantity(found, default_max, &unit)?;

    Ok(samples
        .iter()
        .zip(known)
        .map(|(sample, values)| {
            let lengths: Vec<f64> = sample.solutes().iter().map(Fragment::length_bp).collect();
            let filled = extrapolate(&lengths, reference);
            let merged = values
                .into_iter()
                .zip(filled)
                .map(|(known, fill)| if known.is_nan() { fill } else { known })
                .collect();
            into_quantities(merged, &unit)
        })
        .collect())
}

/// `divs` integers evenly spaced on a log scale between `min` and `max`
///
/// Values are rounded to the nearest integer, halves away from zero.
pub fn logspace_int(min: f64, max: f64, divs: usize) -> Result<Vec<u64>> {
    if !(min > 0.0 && max > 0.0 && min.is_finite() && max.is_finite()) {
        return Err(GelError::invalid(format!(
            "log-space bounds must be positive, got {} and {}",
            min, max
        )));
    }
    Ok(logspace(min, max, divs).iter().map(|v| v.round() as u64).collect())
}

/// `divs` values evenly spaced on a log scale, both ends included
pub(crate) fn logspace(min: f64, max: f64, divs: usize) -> Vec<f64> {
    let (lo, hi) = (min.log10(), max.log10());
    match divs {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..divs)
            .map(|i| 10f64.powf(lo + (hi - lo) * i as f64 / (divs - 1) as f64))
            .collect(),
    }
}
