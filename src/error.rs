//! Error type shared by every module of the crate
//!
//! All fallible operations return [`Result<T>`], an alias over [`GelError`].
//! Non-fatal conditions (a vWBR fit that stopped before converging, a
//! nearest-neighbour fallback during interpolation) are not errors: they are
//! reported through `log::warn!` and a flag on the returned value.

use crate::units::Dimension;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, GelError>;

/// Everything that can go wrong while building samples or running a gel
#[derive(Debug, thiserror::Error)]
pub enum GelError {
    /// A quantity was supplied with a physical dimension incompatible with its role
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    Dimensionality {
        what: String,
        expected: Dimension,
        found: Dimension,
    },

    /// An aliquot asked for more volume than the sample holds
    #[error("insufficient volume: requested {requested}, available {available}")]
    InsufficientVolume { requested: String, available: String },

    /// Neither the configured interpolation method nor the nearest-neighbour
    /// fallback produced a mobility
    #[error(
        "mobility undefined for {length} bp at {field} V/cm and {percent} % agarose \
         (query outside the calibration hull and fallback disabled or empty)"
    )]
    InterpolationUndefined { length: f64, field: f64, percent: f64 },

    /// Fewer than three usable probe points were available for the vWBR fit
    #[error("vWBR fit undefined: {usable} usable probe points, at least 3 required")]
    FitUndefined { usable: usize },

    /// No probe length had two valid points in the Ferguson plot
    #[error("free-solution mobility undefined at {field} V/cm: no length qualified for regression")]
    FreeSolutionUndefined { field: f64 },

    /// The Zimm/Rouse crossover root-find did not converge
    #[error("Zimm/Rouse crossover not found: {0}")]
    RegimeBoundary(String),

    /// A unit string could not be parsed
    #[error("cannot parse unit '{text}': {reason}")]
    UnitParse { text: String, reason: String },

    /// Generic argument validation failure
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Results were requested from a gel that has not been run since its last change
    #[error("gel has not been run since it was last configured")]
    NotRun,

    /// CSV or plot output failed
    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GelError {
    /// Shorthand for [`GelError::InvalidInput`]
    pub fn invalid(message: impl Into<String>) -> Self {
        GelError::InvalidInput(message.into())
    }

    /// Shorthand for [`GelError::Dimensionality`]
    pub fn dimensionality(what: impl Into<String>, expected: Dimension, found: Dimension) -> Self {
        GelError::Dimensionality {
            what: what.into(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionality_message_names_both_dimensions() {
        let err = GelError::dimensionality("volume", Dimension::VOLUME, Dimension::MASS);
        let text = err.to_string();
        assert!(text.contains("volume"));
        assert!(text.contains("[length]^3"));
        assert!(text.contains("[mass]"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GelError = io.into();
        assert!(matches!(err, GelError::Io(_)));
    }
}
