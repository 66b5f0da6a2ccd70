//! Dimensioned scalar values

use std::fmt;
use std::ops::{Div, Mul};

use crate::error::{GelError, Result};
use crate::units::{Dimension, Unit};

/// A magnitude paired with its unit
///
/// Arithmetic between quantities checks dimensions where it matters
/// (addition, subtraction, comparison) and composes units otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Build a quantity from a magnitude and a unit expression
    ///
    /// # Example
    ///
    /// ```rust
    /// use gel_rs::units::Quantity;
    ///
    /// let v = Quantity::new(10.0, "ul").unwrap();
    /// assert!((v.value_in("ml").unwrap() - 0.01).abs() < 1e-15);
    /// ```
    pub fn new(magnitude: f64, unit: &str) -> Result<Self> {
        Ok(Self {
            magnitude,
            unit: Unit::parse(unit)?,
        })
    }

    pub fn with_unit(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn dimensionless(magnitude: f64) -> Self {
        Self::with_unit(magnitude, Unit::dimensionless())
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Magnitude expressed in coherent SI units
    pub fn si_value(&self) -> f64 {
        self.magnitude * self.unit.factor()
    }

    pub fn is_nan(&self) -> bool {
        self.magnitude.is_nan()
    }

    /// Convert to another unit of the same dimension
    pub fn to_unit(&self, target: &Unit) -> Result<Quantity> {
        let factor = self.unit.conversion_factor(target)?;
        Ok(Quantity::with_unit(self.magnitude * factor, target.clone()))
    }

    pub fn to(&self, target: &str) -> Result<Quantity> {
        self.to_unit(&Unit::parse(target)?)
    }

    /// Magnitude in `target` units
    pub fn value_in(&self, target: &str) -> Result<f64> {
        Ok(self.to(target)?.magnitude)
    }

    /// Fail with [`GelError::Dimensionality`] unless this quantity has `expected` dimension
    pub fn expect_dimension(&self, expected: Dimension, what: &str) -> Result<()> {
        if self.dimension() != expected {
            return Err(GelError::dimensionality(what, expected, self.dimension()));
        }
        Ok(())
    }

    /// Sum expressed in the units of `self`
    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity> {
        let rhs = other.to_unit(&self.unit)?;
        Ok(Quantity::with_unit(self.magnitude + rhs.magnitude, self.unit.clone()))
    }

    /// Difference expressed in the units of `self`
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity> {
        let rhs = other.to_unit(&self.unit)?;
        Ok(Quantity::with_unit(self.magnitude - rhs.magnitude, self.unit.clone()))
    }

    /// Ratio `self / other` as a plain number; both must share a dimension
    pub fn ratio(&self, other: &Quantity) -> Result<f64> {
        let rhs = other.to_unit(&self.unit)?;
        Ok(self.magnitude / rhs.magnitude)
    }

    /// Ordering after conversion; `None` if either side is NaN
    pub fn checked_cmp(&self, other: &Quantity) -> Result<Option<std::cmp::Ordering>> {
        let rhs = other.to_unit(&self.unit)?;
        Ok(self.magnitude.partial_cmp(&rhs.magnitude))
    }

    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::with_unit(self.magnitude * factor, self.unit.clone())
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.scale(rhs)
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::with_unit(self.magnitude * rhs.magnitude, self.unit.clone() * rhs.unit.clone())
    }
}

impl Div for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::with_unit(self.magnitude / rhs.magnitude, self.unit.clone() / rhs.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

// =================================================================================================
// Amounts
// =================================================================================================

/// Either one quantity for a whole lane or one quantity per solute
#[derive(Debug, Clone, PartialEq)]
pub enum Amounts {
    Scalar(Quantity),
    Sequence(Vec<Quantity>),
}

impl Amounts {
    pub fn len(&self) -> usize {
        match self {
            Amounts::Scalar(_) => 1,
            Amounts::Sequence(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Amounts::Scalar(_))
    }

    /// Magnitudes converted to `unit`, in order
    pub fn magnitudes_in(&self, unit: &Unit) -> Result<Vec<f64>> {
        match self {
            Amounts::Scalar(q) => Ok(vec![q.to_unit(unit)?.magnitude()]),
            Amounts::Sequence(v) => v
                .iter()
                .map(|q| q.to_unit(unit).map(|c| c.magnitude()))
                .collect(),
        }
    }

    /// Check every entry against one dimension
    pub fn expect_dimension(&self, expected: Dimension, what: &str) -> Result<()> {
        match self {
            Amounts::Scalar(q) => q.expect_dimension(expected, what),
            Amounts::Sequence(v) => v.iter().try_for_each(|q| q.expect_dimension(expected, what)),
        }
    }
}

impl From<Quantity> for Amounts {
    fn from(q: Quantity) -> Self {
        Amounts::Scalar(q)
    }
}

impl From<Vec<Quantity>> for Amounts {
    fn from(v: Vec<Quantity>) -> Self {
        Amounts::Sequence(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_converts_to_left_unit() {
        let a = Quantity::new(1.0, "ml").unwrap();
        let b = Quantity::new(250.0, "ul").unwrap();
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.unit().symbol(), "ml");
        assert_relative_eq!(sum.magnitude(), 1.25, max_relative = 1e-12);
    }

    #[test]
    fn test_add_rejects_mixed_dimensions() {
        let a = Quantity::new(1.0, "ml").unwrap();
        let b = Quantity::new(1.0, "ng").unwrap();
        assert!(matches!(a.checked_add(&b), Err(GelError::Dimensionality { .. })));
    }

    #[test]
    fn test_concentration_from_division() {
        let mass = Quantity::new(100.0, "ng").unwrap();
        let vol = Quantity::new(10.0, "ul").unwrap();
        let conc = &mass / &vol;
        assert_eq!(conc.dimension(), Dimension::MASS_CONCENTRATION);
        assert_relative_eq!(conc.value_in("ng/ul").unwrap(), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_percent_converts_to_fraction() {
        let p = Quantity::new(1.5, "%").unwrap();
        assert_relative_eq!(p.si_value(), 0.015);
    }

    #[test]
    fn test_compare_across_units() {
        let a = Quantity::new(1.0, "cm").unwrap();
        let b = Quantity::new(5.0, "mm").unwrap();
        assert_eq!(a.checked_cmp(&b).unwrap(), Some(std::cmp::Ordering::Greater));
    }

    #[test]
    fn test_amounts_magnitudes() {
        let ng = Unit::parse("ng").unwrap();
        let amounts = Amounts::from(vec![
            Quantity::new(1.0, "ug").unwrap(),
            Quantity::new(20.0, "ng").unwrap(),
        ]);
        let m = amounts.magnitudes_in(&ng).unwrap();
        assert_relative_eq!(m[0], 1000.0, max_relative = 1e-12);
        assert_relative_eq!(m[1], 20.0, max_relative = 1e-12);
    }
}
