//! Output of gel runs
//!
//! - **visualization**: diagnostic plots (PNG/SVG) using plotters
//! - **export**: band and fit tables as CSV
//!
//! ```rust,ignore
//! use gel_rs::output::{export_bands_csv, plot_lane_profiles};
//!
//! let run = gel.run(&RunConfiguration::default())?;
//! export_bands_csv(run, "bands.csv", None)?;
//! plot_lane_profiles(run, 8.0, "lanes.svg", None)?;
//! ```

pub mod export;
pub mod visualization;

pub use export::{export_bands_csv, export_fit_csv, CsvConfig, CsvExporter, CsvMetadata, Exporter};
pub use visualization::{plot_ferguson, plot_lane_profiles, plot_vwbr_fit, PlotConfig};
