//! Physical dimensions as integer exponent vectors over the SI base quantities

use std::fmt;
use std::ops::{Div, Mul};

/// Exponents of mass, length, time, electric current, temperature and amount
///
/// Base-pairs, pixels and percent are dimensionless counts and do not appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub current: i8,
    pub temperature: i8,
    pub amount: i8,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new(0, 0, 0, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(1, 0, 0, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(0, 1, 0, 0, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0);
    pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 1, 0, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, 1, 0);
    pub const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 0, 1);

    pub const AREA: Dimension = Dimension::new(0, 2, 0, 0, 0, 0);
    pub const VOLUME: Dimension = Dimension::new(0, 3, 0, 0, 0, 0);
    /// kg·m²·s⁻³·A⁻¹
    pub const VOLTAGE: Dimension = Dimension::new(1, 2, -3, -1, 0, 0);
    /// V/m
    pub const FIELD: Dimension = Dimension::new(1, 1, -3, -1, 0, 0);
    /// m²/(V·s)
    pub const MOBILITY: Dimension = Dimension::new(-1, 0, 2, 1, 0, 0);
    /// m²/s
    pub const DIFFUSIVITY: Dimension = Dimension::new(0, 2, -1, 0, 0, 0);
    /// kg/m³
    pub const MASS_CONCENTRATION: Dimension = Dimension::new(1, -3, 0, 0, 0, 0);
    /// mol/m³
    pub const MOLAR_CONCENTRATION: Dimension = Dimension::new(0, -3, 0, 0, 0, 1);

    pub const fn new(mass: i8, length: i8, time: i8, current: i8, temperature: i8, amount: i8) -> Self {
        Self {
            mass,
            length,
            time,
            current,
            temperature,
            amount,
        }
    }

    fn exponents(&self) -> [i8; 6] {
        [
            self.mass,
            self.length,
            self.time,
            self.current,
            self.temperature,
            self.amount,
        ]
    }

    fn from_exponents(e: [i8; 6]) -> Self {
        Self::new(e[0], e[1], e[2], e[3], e[4], e[5])
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    /// Raise to an integer power
    pub fn powi(&self, power: i32) -> Self {
        let mut e = self.exponents();
        for x in e.iter_mut() {
            *x = (*x as i32 * power) as i8;
        }
        Self::from_exponents(e)
    }

    pub fn recip(&self) -> Self {
        self.powi(-1)
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        let (a, b) = (self.exponents(), rhs.exponents());
        let mut e = [0i8; 6];
        for i in 0..6 {
            e[i] = a[i] + b[i];
        }
        Dimension::from_exponents(e)
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self * rhs.recip()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 6] = ["mass", "length", "time", "current", "temperature", "substance"];

        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let parts: Vec<String> = self
            .exponents()
            .iter()
            .zip(NAMES.iter())
            .filter(|(e, _)| **e != 0)
            .map(|(e, name)| match e {
                1 => format!("[{}]", name),
                _ => format!("[{}]^{}", name, e),
            })
            .collect();

        write!(f, "{}", parts.join(" * "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobility_is_area_per_voltage_time() {
        assert_eq!(Dimension::AREA / (Dimension::VOLTAGE * Dimension::TIME), Dimension::MOBILITY);
    }

    #[test]
    fn test_field_is_voltage_per_length() {
        assert_eq!(Dimension::VOLTAGE / Dimension::LENGTH, Dimension::FIELD);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "dimensionless");
        assert_eq!(Dimension::VOLUME.to_string(), "[length]^3");
        assert_eq!(Dimension::MASS_CONCENTRATION.to_string(), "[mass] * [length]^-3");
    }
}
