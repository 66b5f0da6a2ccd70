//! Export of gel runs
//!
//! The [`Exporter`] trait abstracts the file format; each format lives in
//! its own sub-module. CSV is the only one so far.
//!
//! ```rust,ignore
//! use gel_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export_bands(run, Path::new("bands.csv"))?;
//! exporter.export_fit(run, Path::new("vwbr_fit.csv"))?;
//! ```

pub mod csv;

pub use csv::{export_bands_csv, export_fit_csv, CsvConfig, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::gel::GelRun;

/// A file format for gel runs
///
/// Each format reports its own error type.
pub trait Exporter {
    type Error: std::error::Error;

    /// One row per band, lane by lane
    fn export_bands(&self, run: &GelRun, path: &Path) -> Result<(), Self::Error>;

    /// Probe mobilities of the vWBR fit against the fitted curve
    fn export_fit(&self, run: &GelRun, path: &Path) -> Result<(), Self::Error>;
}
