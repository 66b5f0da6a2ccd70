//! CSV export of gel runs
//!
//! Two tables are written:
//!
//! - the **band table**: one row per band, lane by lane
//! - the **fit table**: the probe mobilities the vWBR fit used, next to the
//!   fitted curve
//!
//! # Example
//!
//! ```rust,ignore
//! use gel_rs::output::export::{export_bands_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_run(run));
//! export_bands_csv(run, "bands.csv", Some(&config))?;
//! ```
//!
//! **Output** (`bands.csv`):
//! ```csv
//! # Gel Electrophoresis Simulation
//! # Generated: 2026-10-16T09:30:00+00:00
//! # Run Time: 5124.3 s
//! # mu0: 3.12e-4 cm2/(V s)
//! #
//! lane,label,length (bp),quantity (ng),mobility (cm2/(V s)),distance (cm),...
//! lane1,500 bp,500.000000,12.500000,...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GelError, Result};
use crate::gel::GelRun;
use crate::output::export::Exporter;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use gel_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Significant decimal places (default: 6)
    pub precision: usize,

    /// Write `#` comment lines before the header (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon-delimited with a decimal comma
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.delimiter == self.decimal_separator {
            return Err(GelError::Export(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Header comments; only fields that are set are written
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Calibration dataset name
    pub dataset: Option<String>,
    /// \[V/cm\]
    pub field: Option<f64>,
    /// \[%\]
    pub percent: Option<f64>,
    /// \[K\]
    pub temperature: Option<f64>,
    /// \[s\]
    pub run_time: Option<f64>,
    /// \[cm²/(V·s)\]
    pub mu0: Option<f64>,
    /// Fitted (μS, μL, γ)
    pub vwbr: Option<[f64; 3]>,
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Run time, μ0 and the vWBR parameters of `run`
    pub fn from_run(run: &GelRun) -> Self {
        Self {
            run_time: Some(run.run_time),
            mu0: Some(run.mu0),
            vwbr: Some(run.vwbr.params.as_array()),
            ..Default::default()
        }
    }

    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<()> {
    writeln!(out, "# Gel Electrophoresis Simulation")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(dataset) = &metadata.dataset {
        writeln!(out, "# Dataset: {}", dataset)?;
    }
    if let Some(field) = metadata.field {
        writeln!(out, "# Field: {} V/cm", field)?;
    }
    if let Some(percent) = metadata.percent {
        writeln!(out, "# Agarose: {} %", percent)?;
    }
    if let Some(t) = metadata.temperature {
        writeln!(out, "# Temperature: {} K", t)?;
    }
    if let Some(t) = metadata.run_time {
        writeln!(out, "# Run Time: {} s", t)?;
    }
    if let Some(mu0) = metadata.mu0 {
        writeln!(out, "# mu0: {:e} cm2/(V s)", mu0)?;
    }
    if let Some([mu_s, mu_l, gamma]) = metadata.vwbr {
        writeln!(out, "# vWBR: muS={:e} muL={:e} gamma={} bp", mu_s, mu_l, gamma)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }
    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = if value.is_finite() {
        format!("{:.prec$}", value, prec = config.precision)
    } else {
        format!("{}", value)
    };
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Quote a text field when it contains the delimiter or a quote
fn format_text(text: &str, config: &CsvConfig) -> String {
    if text.contains(config.delimiter) || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn open(path: &Path, config: &CsvConfig) -> Result<BufWriter<File>> {
    let mut out = BufWriter::new(File::create(path)?);
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }
    Ok(out)
}

fn write_row<W: Write>(out: &mut W, cells: &[String], config: &CsvConfig) -> Result<()> {
    let delimiter = config.delimiter.to_string();
    writeln!(out, "{}", cells.join(&delimiter))?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

const BAND_HEADERS: [&str; 12] = [
    "lane",
    "label",
    "length (bp)",
    "quantity (ng)",
    "mobility (cm2/(V s))",
    "distance (cm)",
    "well bandwidth (cm)",
    "diffusion bandwidth (cm)",
    "bandwidth (cm)",
    "intensity",
    "regime",
    "volume (ul)",
];

/// Write the band table of `run` to `path`
///
/// # Errors
///
/// - `Export` when the run has no bands or the configuration is ambiguous
/// - `Io` on file errors
pub fn export_bands_csv(run: &GelRun, path: impl AsRef<Path>, config: Option<&CsvConfig>) -> Result<()> {
    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    config.validate()?;

    let bands = run.bands();
    if bands.is_empty() {
        return Err(GelError::Export("run has no bands".into()));
    }

    let mut out = open(path.as_ref(), config)?;
    let headers: Vec<String> = BAND_HEADERS.iter().map(|h| format_text(h, config)).collect();
    write_row(&mut out, &headers, config)?;

    for band in bands {
        let cells = vec![
            format_text(band.lane_name, config),
            format_text(band.label, config),
            format_number(band.length, config),
            format_number(band.quantity, config),
            format_number(band.mobility, config),
            format_number(band.distance, config),
            format_number(band.well_bandwidth, config),
            format_number(band.diffusion_bandwidth, config),
            format_number(band.bandwidth, config),
            format_number(band.intensity, config),
            band.regime.as_str().to_string(),
            format_number(run.volumes[band.lane], config),
        ];
        write_row(&mut out, &cells, config)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the vWBR probe mobilities and the fitted curve to `path`
pub fn export_fit_csv(run: &GelRun, path: impl AsRef<Path>, config: Option<&CsvConfig>) -> Result<()> {
    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    config.validate()?;

    if run.vwbr.probes.is_empty() {
        return Err(GelError::Export("vWBR fit has no probe points".into()));
    }

    let mut out = open(path.as_ref(), config)?;
    let headers = ["length (bp)", "interpolated (cm2/(V s))", "fitted (cm2/(V s))"];
    let headers: Vec<String> = headers.iter().map(|h| format_text(h, config)).collect();
    write_row(&mut out, &headers, config)?;

    for &(length, mobility) in &run.vwbr.probes {
        let cells = vec![
            format_number(length, config),
            format_number(mobility, config),
            format_number(run.vwbr.params.mobility(length), config),
        ];
        write_row(&mut out, &cells, config)?;
    }
    out.flush()?;
    Ok(())
}

/// [`Exporter`] writing CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = GelError;

    fn export_bands(&self, run: &GelRun, path: &Path) -> Result<()> {
        export_bands_csv(run, path, Some(&self.config))
    }

    fn export_fit(&self, run: &GelRun, path: &Path) -> Result<()> {
        export_fit_csv(run, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_european() {
        let config = CsvConfig::european().precision(2);
        assert_eq!(format_number(3.14159, &config), "3,14");
        assert_eq!(format_number(f64::NAN, &config), "NaN");
    }

    #[test]
    fn test_format_text_quotes_delimiter() {
        let config = CsvConfig::default();
        assert_eq!(format_text("ladder (500 bp)", &config), "ladder (500 bp)");
        assert_eq!(format_text("a,b", &config), "\"a,b\"");
        assert_eq!(format_text("say \"hi\"", &config), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_ambiguous_config_rejected() {
        let config = CsvConfig::default().delimiter('.');
        assert!(matches!(config.validate(), Err(GelError::Export(_))));
    }

    #[test]
    fn test_metadata_header() {
        let mut metadata = CsvMetadata {
            field: Some(5.0),
            run_time: Some(3600.0),
            ..Default::default()
        };
        metadata.add_custom("operator", "bench 3");
        let mut buffer = Vec::new();
        write_metadata_header(&mut buffer, &metadata).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Gel Electrophoresis Simulation\n# Generated: "));
        assert!(text.contains("# Field: 5 V/cm\n"));
        assert!(text.contains("# Run Time: 3600 s\n"));
        assert!(text.contains("# operator: bench 3\n"));
        assert!(!text.contains("Agarose"));
        assert!(text.ends_with("#\n"));
    }
}
