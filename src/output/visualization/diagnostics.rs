//! Diagnostic plots of a gel run
//!
//! - [`plot_vwbr_fit`]: probe mobilities and the fitted vWBR curve, log length axis
//! - [`plot_ferguson`]: ln μ against gel strength with the regression lines
//!   extended back to 0 %
//! - [`plot_lane_profiles`]: summed band intensity along each lane
//!
//! The output format follows the file extension: `.svg` gives a vector
//! image, anything else a bitmap.
//!
//! ```rust,ignore
//! use gel_rs::output::visualization::{plot_vwbr_fit, plot_lane_profiles};
//!
//! let run = gel.run(&RunConfiguration::default())?;
//! plot_vwbr_fit(run, "fit.svg", None)?;
//! plot_lane_profiles(run, 8.0, "lanes.png", None)?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::error::{GelError, Result};
use crate::ferguson::FergusonResult;
use crate::gel::{linspace, GelRun};

/// Samples per lane profile
const PROFILE_POINTS: usize = 800;

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

fn plot_error(e: Box<dyn Error>) -> GelError {
    GelError::Export(format!("plot failed: {}", e))
}

/// Finite (min, max) of `values`, widened when degenerate
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return None;
    }
    if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        let pad = 0.05 * lo.abs().max(1.0);
        return Some((lo - pad, hi + pad));
    }
    Some((lo, hi))
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot the vWBR fit of `run`
///
/// # Errors
///
/// `Export` when the fit has no probe points or the backend fails.
pub fn plot_vwbr_fit(run: &GelRun, output_path: impl AsRef<Path>, config: Option<&PlotConfig>) -> Result<()> {
    let path = output_path.as_ref();
    let probes: Vec<(f64, f64)> = run
        .vwbr
        .probes
        .iter()
        .copied()
        .filter(|(l, mu)| *l > 0.0 && mu.is_finite())
        .collect();
    if probes.is_empty() {
        return Err(GelError::Export("vWBR fit has no probe points to plot".into()));
    }

    let default_config = PlotConfig::vwbr_fit(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let (l_min, l_max) = bounds(probes.iter().map(|p| p.0)).unwrap_or((100.0, 50_000.0));
    let curve: Vec<(f64, f64)> = (0..200)
        .map(|i| {
            let l = l_min * (l_max / l_min).powf(i as f64 / 199.0);
            (l, run.vwbr.params.mobility(l))
        })
        .collect();
    let (mu_min, mu_max) = bounds(probes.iter().chain(&curve).map(|p| p.1)).unwrap_or((0.0, 1.0));

    let result = if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        vwbr_fit_impl(backend, &probes, &curve, config, (l_min, l_max), (mu_min, mu_max))
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        vwbr_fit_impl(backend, &probes, &curve, config, (l_min, l_max), (mu_min, mu_max))
    };
    result.map_err(plot_error)
}

/// Plot a Ferguson extrapolation
///
/// # Errors
///
/// `Export` when no length qualified for a regression or the backend fails.
pub fn plot_ferguson(
    ferguson: &FergusonResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let path = output_path.as_ref();
    if ferguson.lines.is_empty() {
        return Err(GelError::Export("Ferguson extrapolation has no lines to plot".into()));
    }

    let default_config = PlotConfig::ferguson(format!("Ferguson plot at {} V/cm", ferguson.field));
    let config = config.unwrap_or(&default_config);

    let p_max = ferguson.percents.iter().copied().fold(0.0, f64::max).max(1e-3) * 1.05;
    let y_values = ferguson
        .ln_mobility
        .iter()
        .copied()
        .chain(ferguson.lines.iter().map(|l| l.fit.intercept));
    let (y_min, y_max) = bounds(y_values).unwrap_or((-10.0, -7.0));

    let result = if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        ferguson_impl(backend, ferguson, config, p_max, (y_min, y_max))
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        ferguson_impl(backend, ferguson, config, p_max, (y_min, y_max))
    };
    result.map_err(plot_error)
}

/// Plot the intensity profile of every lane along a gel `gel_length` cm long
pub fn plot_lane_profiles(
    run: &GelRun,
    gel_length: f64,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let path = output_path.as_ref();
    if !(gel_length.is_finite() && gel_length > 0.0) {
        return Err(GelError::invalid(format!("gel length must be positive, got {} cm", gel_length)));
    }
    if run.n_bands() == 0 {
        return Err(GelError::Export("run has no bands to plot".into()));
    }

    let default_config = PlotConfig::lane_profiles(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let xs = linspace(0.0, gel_length, PROFILE_POINTS);
    let profiles: Vec<Vec<f64>> = (0..run.n_lanes()).map(|lane| run.lane_profile(lane, &xs)).collect();
    let y_max = profiles
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
        .max(1e-10);

    let result = if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        lane_profiles_impl(backend, &xs, &profiles, &run.lane_names, config, gel_length, y_max)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        lane_profiles_impl(backend, &xs, &profiles, &run.lane_names, config, gel_length, y_max)
    };
    result.map_err(plot_error)
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn vwbr_fit_impl<DB: DrawingBackend>(
    backend: DB,
    probes: &[(f64, f64)],
    curve: &[(f64, f64)],
    config: &PlotConfig,
    (l_min, l_max): (f64, f64),
    (mu_min, mu_max): (f64, f64),
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let pad = 0.05 * (mu_max - mu_min);
    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d((l_min..l_max).log_scale(), (mu_min - pad)..(mu_max + pad))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2e}", y))
            .draw()?;
    }

    let probe_color = config.series_color(1);
    chart
        .draw_series(probes.iter().map(|&p| Circle::new(p, 3, probe_color.filled())))?
        .label("Interpolated")
        .legend(move |(x, y)| Circle::new((x + 10, y), 3, probe_color.filled()));

    chart
        .draw_series(LineSeries::new(
            curve.iter().copied(),
            ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
        ))?
        .label("vWBR fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.line_color));

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn ferguson_impl<DB: DrawingBackend>(
    backend: DB,
    ferguson: &FergusonResult,
    config: &PlotConfig,
    p_max: f64,
    (y_min, y_max): (f64, f64),
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let pad = 0.05 * (y_max - y_min);
    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..p_max, (y_min - pad)..(y_max + pad))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    for (k, line) in ferguson.lines.iter().enumerate() {
        let color = config.series_color(k);
        let row = ferguson.lengths.iter().position(|l| *l == line.length);

        if let Some(i) = row {
            let points = ferguson
                .percents
                .iter()
                .zip(ferguson.ln_mobility.row(i))
                .filter(|(_, v)| v.is_finite())
                .map(|(p, v)| Circle::new((*p, *v), 3, color.filled()));
            chart.draw_series(points)?;
        }

        let fit = line.fit;
        chart
            .draw_series(LineSeries::new(
                [0.0, p_max].map(|p| (p, fit.slope * p + fit.intercept)),
                ShapeStyle::from(&color).stroke_width(1),
            ))?
            .label(format!("{} bp", line.length))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if let Some(mu0) = ferguson.mu0 {
        let y = mu0.ln();
        chart
            .draw_series(std::iter::once(Cross::new((0.0, y), 6, BLACK.stroke_width(2))))?
            .label(format!("ln mu0 = {:.3}", y))
            .legend(|(x, y)| Cross::new((x + 10, y), 4, BLACK.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn lane_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    xs: &[f64],
    profiles: &[Vec<f64>],
    names: &[String],
    config: &PlotConfig,
    gel_length: f64,
    y_max: f64,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..gel_length, 0.0..(y_max * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    for (k, profile) in profiles.iter().enumerate() {
        let color = config.series_color(k);
        let label = names.get(k).map(String::as_str).unwrap_or("?");
        chart
            .draw_series(LineSeries::new(
                xs.iter().zip(profile).map(|(x, y)| (*x, *y)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
