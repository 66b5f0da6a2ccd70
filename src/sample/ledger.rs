//! The sample ledger: solutes, their quantities and one shared volume
//!
//! # Mutation contract
//!
//! | Operation        | Source sample                          | Returns              |
//! |------------------|----------------------------------------|----------------------|
//! | `add_solute`     | mutated in place                       | `()`                 |
//! | `dilute`         | volume mutated in place                | `()`                 |
//! | `aliquot`        | depleted unless endless                | new sample           |
//! | `divide`         | emptied unless endless                 | `k` new samples      |
//! | `mix` / `+`      | untouched                              | new sample           |
//!
//! Every fallible operation validates its arguments before touching the
//! ledger, so an `Err` leaves the sample exactly as it was.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use crate::error::{GelError, Result};
use crate::units::{Dimension, Quantity, Unit};

/// Unit given to quantities when a sample is built without any
pub const DEFAULT_QUANTITY_UNIT: &str = "ng";

/// A homogeneous liquid holding unique solutes
///
/// Quantities are stored as magnitudes in one quantity unit (mass or amount
/// of substance); a missing quantity is `NaN` until assigned.
#[derive(Debug, Clone)]
pub struct Sample<S> {
    solutes: Vec<S>,
    quantities: Vec<f64>,
    quantity_unit: Unit,
    volume: Quantity,
    endless: bool,
}

fn check_quantity_dimension(q: &Quantity, what: &str) -> Result<()> {
    let dim = q.dimension();
    if dim != Dimension::MASS && dim != Dimension::AMOUNT {
        return Err(GelError::dimensionality(what, Dimension::MASS, dim));
    }
    Ok(())
}

fn check_volume(volume: &Quantity, what: &str) -> Result<()> {
    volume.expect_dimension(Dimension::VOLUME, what)
}

impl<S: Clone + PartialEq> Sample<S> {
    /// Build a sample, merging duplicate solutes
    ///
    /// Quantities beyond those given are padded with `NaN`. All quantities are
    /// expressed in the unit of the first one (`ng` if none is given). The
    /// volume may be `NaN` when it is to be decided later (e.g. by the gel's
    /// well geometry).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if there are more quantities than solutes
    /// - `Dimensionality` if a quantity is not a mass or an amount of
    ///   substance, or the volume is not a volume
    pub fn new(solutes: Vec<S>, quantities: Vec<Quantity>, volume: Quantity) -> Result<Self> {
        if quantities.len() > solutes.len() {
            return Err(GelError::invalid(format!(
                "{} quantities given for {} solutes",
                quantities.len(),
                solutes.len()
            )));
        }
        check_volume(&volume, "sample volume")?;

        let quantity_unit = match quantities.first() {
            Some(q) => {
                check_quantity_dimension(q, "sample quantity")?;
                q.unit().clone()
            }
            None => Unit::parse(DEFAULT_QUANTITY_UNIT)?,
        };
        let mut magnitudes = quantities
            .iter()
            .map(|q| q.to_unit(&quantity_unit).map(|c| c.magnitude()))
            .collect::<Result<Vec<f64>>>()?;
        magnitudes.resize(solutes.len(), f64::NAN);

        let mut sample = Self {
            solutes: Vec::with_capacity(solutes.len()),
            quantities: Vec::with_capacity(solutes.len()),
            quantity_unit,
            volume,
            endless: false,
        };
        for (solute, q) in solutes.into_iter().zip(magnitudes) {
            sample.merge(solute, q);
        }
        Ok(sample)
    }

    /// Build a sample from plain magnitudes in `unit`
    pub fn from_values(solutes: Vec<S>, values: &[f64], unit: &str, volume: Quantity) -> Result<Self> {
        let quantities = values
            .iter()
            .map(|&v| Quantity::new(v, unit))
            .collect::<Result<Vec<_>>>()?;
        if quantities.is_empty() {
            // keep the requested unit even without values
            let unit = Unit::parse(unit)?;
            let probe = Quantity::with_unit(f64::NAN, unit.clone());
            check_quantity_dimension(&probe, "sample quantity")?;
            let mut sample = Self::new(solutes, Vec::new(), volume)?;
            sample.quantity_unit = unit;
            return Ok(sample);
        }
        Self::new(solutes, quantities, volume)
    }

    /// A sample with no solutes
    pub fn empty(volume: Quantity) -> Result<Self> {
        Self::new(Vec::new(), Vec::new(), volume)
    }

    /// Mark the sample as an idealised stock that aliquots never deplete
    pub fn with_endless(mut self, endless: bool) -> Self {
        self.endless = endless;
        self
    }

    fn merge(&mut self, solute: S, quantity: f64) {
        match self.solutes.iter().position(|s| *s == solute) {
            Some(i) => self.quantities[i] += quantity,
            None => {
                self.solutes.push(solute);
                self.quantities.push(quantity);
            }
        }
    }

    fn index_of(&self, solute: &S) -> Option<usize> {
        self.solutes.iter().position(|s| s == solute)
    }

    // =============================================================================================
    // Accessors
    // =============================================================================================

    pub fn solutes(&self) -> &[S] {
        &self.solutes
    }

    /// Quantity magnitudes in [`Sample::quantity_unit`]
    pub fn quantity_values(&self) -> &[f64] {
        &self.quantities
    }

    pub fn quantity_unit(&self) -> &Unit {
        &self.quantity_unit
    }

    pub fn quantities(&self) -> Vec<Quantity> {
        self.quantities
            .iter()
            .map(|&q| Quantity::with_unit(q, self.quantity_unit.clone()))
            .collect()
    }

    pub fn quantity(&self, index: usize) -> Option<Quantity> {
        self.quantities
            .get(index)
            .map(|&q| Quantity::with_unit(q, self.quantity_unit.clone()))
    }

    pub fn volume(&self) -> &Quantity {
        &self.volume
    }

    pub fn is_endless(&self) -> bool {
        self.endless
    }

    /// Number of solutes
    pub fn len(&self) -> usize {
        self.solutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutes.is_empty()
    }

    /// Sum of all quantities; `NaN` if any quantity is still unassigned
    pub fn total_quantity(&self) -> Quantity {
        Quantity::with_unit(self.quantities.iter().sum(), self.quantity_unit.clone())
    }

    /// An endless copy of this sample
    pub fn stock_solution(&self) -> Self {
        self.clone().with_endless(true)
    }

    // =============================================================================================
    // Concentrations
    // =============================================================================================

    /// Concentration of the solute at `index`
    pub fn concentration(&self, index: usize) -> Result<Quantity> {
        let q = self.quantity(index).ok_or_else(|| {
            GelError::invalid(format!("solute index {} out of range ({} solutes)", index, self.len()))
        })?;
        Ok(&q / &self.volume)
    }

    /// Concentration of `solute`
    pub fn concentration_of(&self, solute: &S) -> Result<Quantity> {
        let index = self
            .index_of(solute)
            .ok_or_else(|| GelError::invalid("solute not present in sample"))?;
        self.concentration(index)
    }

    /// Concentration of every solute, in order
    pub fn concentrations(&self) -> Vec<Quantity> {
        self.quantities()
            .iter()
            .map(|q| q / &self.volume)
            .collect()
    }

    // =============================================================================================
    // In-place operations
    // =============================================================================================

    /// Add `quantity` of `solute`, merging with an existing entry
    pub fn add_solute(&mut self, solute: S, quantity: &Quantity) -> Result<()> {
        let magnitude = quantity.to_unit(&self.quantity_unit)?.magnitude();
        self.merge(solute, magnitude);
        Ok(())
    }

    /// Add solvent until the dilution target is reached
    ///
    /// Precedence when several targets are set: final concentration, then
    /// factor, then final volume. A final concentration refers to one solute
    /// (index 0 unless [`Dilution::reference`] says otherwise).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if no target is set, the factor is not positive, the
    ///   reference solute does not exist, or the resulting volume is not
    ///   finite
    /// - `InsufficientVolume` if the resulting volume is smaller than the
    ///   current one
    /// - `Dimensionality` if the final volume or concentration has the wrong
    ///   dimension
    pub fn dilute(&mut self, target: &Dilution) -> Result<()> {
        let final_volume = if let Some(final_conc) = &target.final_concentration {
            let index = target.reference.unwrap_or(0);
            let initial = self.concentration(index)?;
            final_conc.expect_dimension(initial.dimension(), "final concentration")?;
            let ratio = initial.ratio(final_conc)?;
            self.volume.scale(ratio)
        } else if let Some(factor) = target.factor {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(GelError::invalid(format!("dilution factor must be positive, got {}", factor)));
            }
            self.volume.scale(factor)
        } else if let Some(volume) = &target.final_volume {
            check_volume(volume, "final volume")?;
            volume.to_unit(self.volume.unit())?
        } else {
            return Err(GelError::invalid(
                "dilution needs a factor, a final volume or a final concentration",
            ));
        };

        if !final_volume.magnitude().is_finite() {
            return Err(GelError::invalid(format!("cannot dilute {} to {}", self.volume, final_volume)));
        }
        // diluting only adds solvent
        if final_volume.checked_cmp(&self.volume)? == Some(Ordering::Less) {
            return Err(GelError::InsufficientVolume {
                requested: final_volume.to_string(),
                available: self.volume.to_string(),
            });
        }
        self.volume = final_volume;
        Ok(())
    }

    // =============================================================================================
    // Operations returning new samples
    // =============================================================================================

    /// Take `volume` out of this sample
    ///
    /// The aliquot carries every solute scaled by `volume / self.volume` and is
    /// never endless itself. A finite sample loses the same volume and
    /// quantities; an endless one is left as it was.
    ///
    /// # Errors
    ///
    /// - `Dimensionality` if `volume` is not a volume
    /// - `InvalidInput` if `volume` is negative or not finite
    /// - `InsufficientVolume` if `volume` exceeds what a finite sample holds
    pub fn aliquot(&mut self, volume: &Quantity) -> Result<Sample<S>> {
        check_volume(volume, "aliquot volume")?;
        if !(volume.magnitude().is_finite() && volume.magnitude() >= 0.0) {
            return Err(GelError::invalid(format!("aliquot volume must be non-negative, got {}", volume)));
        }
        if !self.endless && volume.checked_cmp(&self.volume)? == Some(Ordering::Greater) {
            return Err(GelError::InsufficientVolume {
                requested: volume.to_string(),
                available: self.volume.to_string(),
            });
        }

        // an empty sample has nothing to give
        let fraction = if self.volume.magnitude() == 0.0 {
            0.0
        } else {
            volume.ratio(&self.volume)?
        };
        let taken: Vec<f64> = self.quantities.iter().map(|q| q * fraction).collect();
        if !self.endless {
            self.volume = self.volume.checked_sub(volume)?;
            for (q, t) in self.quantities.iter_mut().zip(&taken) {
                *q -= t;
            }
        }

        Ok(Sample {
            solutes: self.solutes.clone(),
            quantities: taken,
            quantity_unit: self.quantity_unit.clone(),
            volume: volume.clone(),
            endless: false,
        })
    }

    /// Split into `k` samples of equal volume
    ///
    /// A finite sample is emptied: the first `k - 1` children take
    /// `volume / k` each and the last takes whatever remains. An endless
    /// sample yields `k` full-volume endless copies and is not depleted.
    pub fn divide(&mut self, k: usize) -> Result<Vec<Sample<S>>> {
        if k == 0 {
            return Err(GelError::invalid("cannot divide a sample into 0 parts"));
        }
        if self.endless {
            return Ok(vec![self.clone(); k]);
        }

        let share = self.volume.scale(1.0 / k as f64);
        let mut children = Vec::with_capacity(k);
        for _ in 1..k {
            children.push(self.aliquot(&share)?);
        }
        let rest = self.volume.clone();
        children.push(self.aliquot(&rest)?);
        Ok(children)
    }

    /// Combine two samples into a new one
    ///
    /// Volumes add, quantities of matching solutes add, and the result is
    /// endless only if both inputs are. Units follow `self`.
    pub fn mix(&self, other: &Sample<S>) -> Result<Sample<S>> {
        let volume = self.volume.checked_add(&other.volume)?;
        let factor = other.quantity_unit.conversion_factor(&self.quantity_unit)?;

        let mut mixed = Sample {
            solutes: self.solutes.clone(),
            quantities: self.quantities.clone(),
            quantity_unit: self.quantity_unit.clone(),
            volume,
            endless: self.endless && other.endless,
        };
        for (solute, q) in other.solutes.iter().zip(&other.quantities) {
            mixed.merge(solute.clone(), q * factor);
        }
        Ok(mixed)
    }
}

impl<S: Clone + PartialEq> Add for &Sample<S> {
    type Output = Result<Sample<S>>;

    fn add(self, rhs: &Sample<S>) -> Result<Sample<S>> {
        self.mix(rhs)
    }
}

impl<S: Ord> PartialEq for Sample<S> {
    /// Same volume, same endless flag and the same (solute, quantity) pairs
    fn eq(&self, other: &Self) -> bool {
        if self.endless != other.endless || self.solutes.len() != other.solutes.len() {
            return false;
        }
        if !matches!(self.volume.checked_cmp(&other.volume), Ok(Some(Ordering::Equal))) {
            return false;
        }
        let Ok(factor) = other.quantity_unit.conversion_factor(&self.quantity_unit) else {
            return false;
        };

        let mut lhs: Vec<(&S, f64)> = self.solutes.iter().zip(self.quantities.iter().copied()).collect();
        let mut rhs: Vec<(&S, f64)> = other
            .solutes
            .iter()
            .zip(other.quantities.iter().map(|q| q * factor))
            .collect();
        lhs.sort_by(|a, b| a.0.cmp(b.0));
        rhs.sort_by(|a, b| a.0.cmp(b.0));
        lhs == rhs
    }
}

// =================================================================================================
// Dilution targets
// =================================================================================================

/// What a dilution should reach; see [`Sample::dilute`] for precedence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dilution {
    pub factor: Option<f64>,
    pub final_volume: Option<Quantity>,
    pub final_concentration: Option<Quantity>,
    /// Reference solute index for `final_concentration`
    pub reference: Option<usize>,
}

impl Dilution {
    pub fn by_factor(factor: f64) -> Self {
        Self {
            factor: Some(factor),
            ..Self::default()
        }
    }

    pub fn to_volume(volume: Quantity) -> Self {
        Self {
            final_volume: Some(volume),
            ..Self::default()
        }
    }

    pub fn to_concentration(concentration: Quantity) -> Self {
        Self {
            final_concentration: Some(concentration),
            ..Self::default()
        }
    }

    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = Some(factor);
        self
    }

    pub fn final_volume(mut self, volume: Quantity) -> Self {
        self.final_volume = Some(volume);
        self
    }

    pub fn final_concentration(mut self, concentration: Quantity) -> Self {
        self.final_concentration = Some(concentration);
        self
    }

    pub fn reference(mut self, index: usize) -> Self {
        self.reference = Some(index);
        self
    }
}

// =================================================================================================
// Display
// =================================================================================================

impl<S: Clone + PartialEq + fmt::Display> Sample<S> {
    /// One-line description, e.g. `<sample: vol=10 ul, 3 solutes (200 ng)>`
    pub fn summary(&self) -> String {
        format!(
            "<sample: vol={}{}, {} solutes ({})>",
            self.volume,
            if self.endless { " (endless)" } else { "" },
            self.len(),
            self.total_quantity()
        )
    }
}

impl<S: Clone + PartialEq + fmt::Display> fmt::Display for Sample<S> {
    /// Table of solutes with quantity, concentration and share of the total
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endless = if self.endless { " (endless)" } else { "" };
        let volume_line = format!(
            " sample volume = {:.1} {}{}",
            self.volume.magnitude(),
            self.volume.unit(),
            endless
        );

        if self.is_empty() {
            let line = format!("|{} (no solutes) |", volume_line);
            let rule = format!("+{}+", "-".repeat(line.chars().count() - 2));
            return write!(f, "{}\n{}\n{}", rule, line, rule);
        }

        let concentrations = self.concentrations();
        let conc_unit = concentrations
            .first()
            .map(|c| c.unit().to_string())
            .unwrap_or_default();
        let total: f64 = self.quantities.iter().sum();

        let mut rows = vec![[
            String::new(),
            "Solute".to_string(),
            format!("Q ({})", self.quantity_unit),
            format!("C ({})", conc_unit),
            "%".to_string(),
        ]];
        for (i, solute) in self.solutes.iter().enumerate() {
            rows.push([
                i.to_string(),
                solute.to_string(),
                format!("{:.1}", self.quantities[i]),
                format!("{:.2}", concentrations[i].magnitude()),
                format!("{:.1}", self.quantities[i] / total * 100.0),
            ]);
        }

        let mut widths = [0usize; 5];
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let format_row = |row: &[String; 5]| {
            row.iter()
                .zip(widths)
                .enumerate()
                .map(|(c, (cell, w))| if c == 1 { format!("{:<w$}", cell) } else { format!("{:>w$}", cell) })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let total_line = format!(" solutes quantity = {:.1} {}", total, self.quantity_unit);
        let inner = (widths.iter().sum::<usize>() + 2 * (widths.len() - 1) + 2)
            .max(volume_line.chars().count())
            .max(total_line.chars().count());
        let rule = "-".repeat(inner);

        writeln!(f, "+{}+", rule)?;
        writeln!(f, "|{:<inner$}|", format!(" {}", format_row(&rows[0])))?;
        writeln!(f, "|{}|", rule)?;
        for row in &rows[1..] {
            writeln!(f, "|{:<inner$}|", format!(" {}", format_row(row)))?;
        }
        writeln!(f, "|{}|", rule)?;
        writeln!(f, "|{:<inner$}|", volume_line)?;
        writeln!(f, "|{:<inner$}|", total_line)?;
        write!(f, "+{}+", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::DnaFragment;
    use approx::assert_relative_eq;

    fn ul(v: f64) -> Quantity {
        Quantity::new(v, "ul").unwrap()
    }

    fn ng(v: f64) -> Quantity {
        Quantity::new(v, "ng").unwrap()
    }

    fn two_fragments() -> Sample<DnaFragment> {
        Sample::new(
            DnaFragment::from_lengths(&[500, 1000]),
            vec![ng(20.0), ng(40.0)],
            ul(10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_duplicates_merge_on_construction() {
        let s = Sample::new(
            DnaFragment::from_lengths(&[500, 1000, 500]),
            vec![ng(1.0), ng(2.0), ng(3.0)],
            ul(10.0),
        )
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_relative_eq!(s.quantity_values()[0], 4.0);
    }

    #[test]
    fn test_missing_quantities_are_nan() {
        let s = Sample::new(DnaFragment::from_lengths(&[500, 1000]), vec![ng(1.0)], ul(10.0)).unwrap();
        assert!(s.quantity_values()[1].is_nan());
        assert!(s.total_quantity().is_nan());
    }

    #[test]
    fn test_rejects_extra_quantities_and_bad_dimensions() {
        let too_many = Sample::new(DnaFragment::from_lengths(&[500]), vec![ng(1.0), ng(2.0)], ul(10.0));
        assert!(matches!(too_many, Err(GelError::InvalidInput(_))));

        let bad_volume = Sample::new(DnaFragment::from_lengths(&[500]), vec![ng(1.0)], ng(10.0));
        assert!(matches!(bad_volume, Err(GelError::Dimensionality { .. })));

        let bad_quantity = Sample::new(DnaFragment::from_lengths(&[500]), vec![ul(1.0)], ul(10.0));
        assert!(matches!(bad_quantity, Err(GelError::Dimensionality { .. })));
    }

    #[test]
    fn test_molar_quantities_accepted() {
        let s = Sample::from_values(DnaFragment::from_lengths(&[500]), &[2.0], "pmol", ul(10.0)).unwrap();
        assert_eq!(s.quantity_unit().symbol(), "pmol");
    }

    #[test]
    fn test_add_solute_converts_units() {
        let mut s = two_fragments();
        s.add_solute(DnaFragment::new(500), &Quantity::new(0.01, "ug").unwrap())
            .unwrap();
        assert_relative_eq!(s.quantity_values()[0], 30.0, max_relative = 1e-12);

        s.add_solute(DnaFragment::new(3000), &ng(5.0)).unwrap();
        assert_eq!(s.len(), 3);

        let before = s.clone();
        assert!(s.add_solute(DnaFragment::new(100), &ul(1.0)).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_aliquot_depletes_source() {
        let mut s = two_fragments();
        let a = s.aliquot(&ul(2.5)).unwrap();
        assert_relative_eq!(a.volume().magnitude(), 2.5);
        assert_relative_eq!(a.quantity_values()[1], 10.0, max_relative = 1e-12);
        assert_relative_eq!(s.volume().magnitude(), 7.5, max_relative = 1e-12);
        assert_relative_eq!(s.quantity_values()[1], 30.0, max_relative = 1e-12);
        assert!(!a.is_endless());
    }

    #[test]
    fn test_aliquot_insufficient_volume_leaves_sample() {
        let mut s = two_fragments();
        let before = s.clone();
        let err = s.aliquot(&ul(11.0)).unwrap_err();
        assert!(matches!(err, GelError::InsufficientVolume { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn test_endless_aliquot_keeps_source() {
        let mut stock = two_fragments().stock_solution();
        let a = stock.aliquot(&ul(50.0)).unwrap();
        assert_relative_eq!(a.quantity_values()[0], 100.0, max_relative = 1e-12);
        assert_relative_eq!(stock.volume().magnitude(), 10.0);
    }

    #[test]
    fn test_divide_empties_finite_sample() {
        let mut s = two_fragments();
        let parts = s.divide(3).unwrap();
        assert_eq!(parts.len(), 3);
        let total: f64 = parts.iter().map(|p| p.volume().magnitude()).sum();
        assert_relative_eq!(total, 10.0, max_relative = 1e-12);
        assert!(s.volume().magnitude().abs() < 1e-12);
        assert!(s.divide(0).is_err());
    }

    #[test]
    fn test_aliquot_from_emptied_sample() {
        let mut s = two_fragments();
        s.divide(2).unwrap();
        assert_eq!(s.volume().magnitude(), 0.0);

        let child = s.aliquot(&ul(0.0)).unwrap();
        assert_eq!(child.quantity_values(), &[0.0, 0.0]);
        assert_eq!(s.quantity_values(), &[0.0, 0.0]);
        assert_eq!(s.volume().magnitude(), 0.0);

        let err = s.aliquot(&ul(1.0)).unwrap_err();
        assert!(matches!(err, GelError::InsufficientVolume { .. }));
        assert_eq!(s.quantity_values(), &[0.0, 0.0]);
    }

    #[test]
    fn test_dilute_precedence() {
        let mut s = two_fragments();
        // concentration wins over factor: 20 ng / 10 ul = 2 ng/ul -> 0.5 ng/ul needs 40 ul
        let target = Dilution::by_factor(10.0)
            .final_volume(ul(15.0))
            .final_concentration(Quantity::new(0.5, "ng/ul").unwrap());
        s.dilute(&target).unwrap();
        assert_relative_eq!(s.volume().value_in("ul").unwrap(), 40.0, max_relative = 1e-12);

        // factor wins over final volume
        let mut s = two_fragments();
        s.dilute(&Dilution::by_factor(2.0).final_volume(ul(15.0))).unwrap();
        assert_relative_eq!(s.volume().magnitude(), 20.0, max_relative = 1e-12);

        let mut s = two_fragments();
        s.dilute(&Dilution::to_volume(Quantity::new(0.015, "ml").unwrap())).unwrap();
        assert_relative_eq!(s.volume().value_in("ul").unwrap(), 15.0, max_relative = 1e-12);
    }

    #[test]
    fn test_dilute_reference_solute() {
        let mut s = two_fragments();
        let target = Dilution::to_concentration(Quantity::new(1.0, "ng/ul").unwrap()).reference(1);
        s.dilute(&target).unwrap();
        assert_relative_eq!(s.volume().magnitude(), 40.0, max_relative = 1e-12);
    }

    #[test]
    fn test_dilute_rejects_concentrating() {
        let mut s = two_fragments();
        let err = s.dilute(&Dilution::to_volume(ul(5.0))).unwrap_err();
        assert!(matches!(err, GelError::InsufficientVolume { .. }));
        assert!(s.dilute(&Dilution::default()).is_err());
        assert!(s.dilute(&Dilution::to_concentration(ul(1.0))).is_err());
        assert_relative_eq!(s.volume().magnitude(), 10.0);
    }

    #[test]
    fn test_mix_endless_is_and() {
        let a = two_fragments().stock_solution();
        let b = two_fragments();
        let m = (&a + &b).unwrap();
        assert!(!m.is_endless());
        let m = (&a + &a).unwrap();
        assert!(m.is_endless());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = two_fragments();
        let b = Sample::new(
            DnaFragment::from_lengths(&[1000, 500]),
            vec![ng(40.0), ng(20.0)],
            ul(10.0),
        )
        .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, b.stock_solution());

        let shorter = Sample::new(DnaFragment::from_lengths(&[500]), vec![ng(20.0)], ul(10.0)).unwrap();
        assert_ne!(a, shorter);
    }

    #[test]
    fn test_display_table() {
        let s = two_fragments();
        let table = s.to_string();
        assert!(table.contains("Solute"));
        assert!(table.contains("1000 bp"));
        assert!(table.contains("sample volume = 10.0 ul"));
        assert!(table.contains("solutes quantity = 60.0 ng"));
        assert_eq!(s.summary(), "<sample: vol=10 ul, 2 solutes (60 ng)>");

        let empty: Sample<DnaFragment> = Sample::empty(ul(5.0)).unwrap();
        assert!(empty.to_string().contains("(no solutes)"));
    }
}
