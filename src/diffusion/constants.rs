//! Physical constants for double-stranded DNA in water

/// Boltzmann constant \[J/K\] (CODATA 2018, exact)
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Elementary charge \[C\] (CODATA 2018, exact)
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Persistence length of dsDNA \[m\]
pub const PERSISTENCE_LENGTH: f64 = 50e-9;

/// Kuhn length of dsDNA, twice the persistence length \[m\]
pub const KUHN_LENGTH: f64 = 2.0 * PERSISTENCE_LENGTH;

/// Contour length per base pair \[m/bp\]
pub const RISE_PER_BP: f64 = 0.34e-9;

/// Effective (screened) charge per base pair \[C/bp\]
pub const EFFECTIVE_CHARGE_PER_BP: f64 = ELEMENTARY_CHARGE / 7.0;

/// Constants consumed by the diffusion model
///
/// The defaults are the standard dsDNA values above; tests and exploratory
/// runs may substitute their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolymerConstants {
    /// \[J/K\]
    pub boltzmann: f64,
    /// \[m\]
    pub persistence_length: f64,
    /// \[m\]
    pub kuhn_length: f64,
    /// \[m/bp\]
    pub rise_per_bp: f64,
    /// \[C/bp\]
    pub effective_charge_per_bp: f64,
}

impl Default for PolymerConstants {
    fn default() -> Self {
        Self {
            boltzmann: BOLTZMANN,
            persistence_length: PERSISTENCE_LENGTH,
            kuhn_length: KUHN_LENGTH,
            rise_per_bp: RISE_PER_BP,
            effective_charge_per_bp: EFFECTIVE_CHARGE_PER_BP,
        }
    }
}

/// Dynamic viscosity of water \[Pa·s\] at `temperature` \[K\]
///
/// ```text
/// η(T) = 2.414e-5 · 10^(247.8 / (T − 140))
/// ```
///
/// Within 2.5 % of tabulated values between 0 °C and 370 °C.
pub fn water_viscosity(temperature: f64) -> f64 {
    2.414e-5 * 10f64.powf(247.8 / (temperature - 140.0))
}
