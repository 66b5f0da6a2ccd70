//! Plot configuration shared by the diagnostic plots

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use gel_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::vwbr_fit("1 % agarose, 5 V/cm");
/// config.line_color = BLUE;
/// config.width = 1920;
/// assert_eq!(config.xlabel, "Length (bp)");
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    pub title: String,

    pub xlabel: String,

    pub ylabel: String,

    /// Colour of the fitted or single curve (default: RED)
    pub line_color: RGBColor,

    /// Colours for per-series plots; falls back to a built-in palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// No custom title: the preset's default is used
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn preset(title: impl IntoOptionalTitle, default_title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| default_title.to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    /// Mobility against fragment length, log length axis
    pub fn vwbr_fit(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "vWBR fit", "Length (bp)", "Mobility (cm²/(V·s))")
    }

    /// ln μ against gel concentration, one line per probe length
    pub fn ferguson(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Ferguson plot", "Agarose (%)", "ln mobility")
    }

    /// Summed band intensity along each lane
    pub fn lane_profiles(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Lane profiles", "Distance from well (cm)", "Intensity")
    }

    pub fn series_colors(colors: Vec<RGBColor>) -> Self {
        Self {
            series_colors: Some(colors),
            ..Self::default()
        }
    }

    /// Color for series `index`: custom if provided, else the default palette
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const PALETTE: [RGBColor; 10] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
            RGBColor(255, 192, 203),
            RGBColor(165, 42, 42),
        ];
        PALETTE[index % PALETTE.len()]
    }
}
