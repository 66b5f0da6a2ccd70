//! Run configuration and probe grids
//!
//! # Example
//!
//! ```rust
//! use gel_rs::gel::{Geometry, RunConfiguration};
//!
//! let config = RunConfiguration::default()
//!     .with_geometry(Geometry::Vertical)
//!     .with_till_time(Some(3600.0))
//!     .with_exposure(0.3);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::calibration::DatasetName;
use crate::error::{GelError, Result};
use crate::mobility::InterpolationMethod;
use crate::sample::quantities::logspace;

// =================================================================================================
// Enumerations
// =================================================================================================

/// How the wells are oriented relative to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Geometry {
    /// Band starts as tall as the well
    #[default]
    Horizontal,
    /// Band starts as tall as the loaded liquid column
    Vertical,
}

impl Geometry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Geometry::Horizontal => "horizontal",
            Geometry::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Geometry {
    type Err = GelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Geometry::Horizontal),
            "vertical" => Ok(Geometry::Vertical),
            other => Err(GelError::invalid(format!(
                "unknown geometry '{}', expected 'horizontal' or 'vertical'",
                other
            ))),
        }
    }
}

/// Which contributions make up the band width used for intensities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BandwidthMode {
    /// Well-induced plus diffusional width
    #[default]
    Both,
    WellOnly,
    DiffusionOnly,
}

impl BandwidthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandwidthMode::Both => "both",
            BandwidthMode::WellOnly => "well",
            BandwidthMode::DiffusionOnly => "diffusion",
        }
    }
}

impl fmt::Display for BandwidthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BandwidthMode {
    type Err = GelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(BandwidthMode::Both),
            "well" | "well_only" => Ok(BandwidthMode::WellOnly),
            "diffusion" | "diffusion_only" => Ok(BandwidthMode::DiffusionOnly),
            other => Err(GelError::invalid(format!(
                "unknown bandwidth mode '{}', expected 'both', 'well' or 'diffusion'",
                other
            ))),
        }
    }
}

// =================================================================================================
// Run configuration
// =================================================================================================

/// Options for one [`Gel::run`](crate::gel::Gel::run)
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    /// Fraction of the gel length the fastest band travels
    pub till_len: f64,
    /// Optional hard limit on the run time \[s\]
    pub till_time: Option<f64>,
    /// Saturation control in \[0, 1\]; values outside are clamped
    pub exposure: f64,
    pub geometry: Geometry,
    pub interpolation: InterpolationMethod,
    /// Retry undefined interpolations with nearest-neighbour
    pub replace_nans: bool,
    pub dataset: DatasetName,
    pub bandwidth_mode: BandwidthMode,
    /// Read band widths as full width at tenth maximum instead of half maximum
    pub fwtm: bool,
    /// Starting point of the Zimm/Rouse crossover search \[bp\]
    pub zimm_rouse_guess_bp: f64,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            till_len: 0.75,
            till_time: None,
            exposure: 0.5,
            geometry: Geometry::Horizontal,
            interpolation: InterpolationMethod::Linear,
            replace_nans: true,
            dataset: DatasetName::Vertical,
            bandwidth_mode: BandwidthMode::Both,
            fwtm: false,
            zimm_rouse_guess_bp: 2000.0,
        }
    }
}

impl RunConfiguration {
    pub fn with_till_len(mut self, fraction: f64) -> Self {
        self.till_len = fraction;
        self
    }

    /// Time limit in seconds
    pub fn with_till_time(mut self, seconds: Option<f64>) -> Self {
        self.till_time = seconds;
        self
    }

    pub fn with_exposure(mut self, exposure: f64) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    pub fn with_replace_nans(mut self, replace: bool) -> Self {
        self.replace_nans = replace;
        self
    }

    pub fn with_dataset(mut self, dataset: DatasetName) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_bandwidth_mode(mut self, mode: BandwidthMode) -> Self {
        self.bandwidth_mode = mode;
        self
    }

    pub fn with_fwtm(mut self, fwtm: bool) -> Self {
        self.fwtm = fwtm;
        self
    }

    pub fn with_zimm_rouse_guess(mut self, guess_bp: f64) -> Self {
        self.zimm_rouse_guess_bp = guess_bp;
        self
    }

    /// Exposure clamped to \[0, 1\]
    pub fn exposure_clamped(&self) -> f64 {
        self.exposure.clamp(0.0, 1.0)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.till_len.is_finite() && self.till_len > 0.0) {
            return Err(GelError::invalid(format!(
                "till_len must be a positive fraction of the gel length, got {}",
                self.till_len
            )));
        }
        if let Some(t) = self.till_time
            && !(t.is_finite() && t > 0.0)
        {
            return Err(GelError::invalid(format!("till_time must be positive, got {} s", t)));
        }
        if !self.exposure.is_finite() {
            return Err(GelError::invalid("exposure must be finite"));
        }
        if !(self.zimm_rouse_guess_bp.is_finite() && self.zimm_rouse_guess_bp > 0.0) {
            return Err(GelError::invalid(format!(
                "Zimm/Rouse guess must be a positive length, got {} bp",
                self.zimm_rouse_guess_bp
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Probe grids
// =================================================================================================

/// `n` evenly spaced values from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Lengths and gel strengths at which run-wide scalars are probed
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeGrid {
    /// Lengths for the vWBR fit \[bp\]
    pub vwbr_lengths: Vec<f64>,
    /// Lengths for the Ferguson extrapolation \[bp\]
    pub mu0_lengths: Vec<f64>,
    /// Gel strengths for the Ferguson extrapolation \[%\]; `None` uses the
    /// distinct strengths of the calibration set
    pub mu0_percents: Option<Vec<f64>>,
}

impl Default for ProbeGrid {
    fn default() -> Self {
        Self {
            vwbr_lengths: linspace(100.0, 50_000.0, 100),
            mu0_lengths: logspace(100.0, 3000.0, 10).iter().map(|v| v.round()).collect(),
            mu0_percents: None,
        }
    }
}

impl ProbeGrid {
    pub fn validate(&self) -> Result<()> {
        let positive = |values: &[f64]| values.iter().all(|v| v.is_finite() && *v > 0.0);

        if self.vwbr_lengths.len() < 3 || !positive(&self.vwbr_lengths) {
            return Err(GelError::invalid(
                "vWBR probe lengths need at least 3 positive values",
            ));
        }
        if self.mu0_lengths.is_empty() || !positive(&self.mu0_lengths) {
            return Err(GelError::invalid("mu0 probe lengths need at least 1 positive value"));
        }
        if let Some(percents) = &self.mu0_percents
            && (percents.is_empty() || !positive(percents))
        {
            return Err(GelError::invalid("mu0 gel strengths need at least 1 positive value"));
        }
        Ok(())
    }
}
