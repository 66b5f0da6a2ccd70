//! The gel engine
//!
//! A [`Gel`] is either *Configured* (fresh, or changed by a setter since its
//! last run) or *Run* (holding a [`GelRun`]). [`Gel::run`] always recomputes
//! everything from the current parameters; on error the gel stays
//! Configured and no partial result is published.
//!
//! # Run steps
//!
//! 1. Mobility of every fragment at the configured field and gel strength
//! 2. vWBR fit over the probe lengths
//! 3. Run time: the fastest band travels `till_len` of the gel, capped by `till_time`
//! 4. Distances `t · μ · E`
//! 5. Free-solution mobility μ0 from a Ferguson extrapolation
//! 6. Well-induced band width, converted through a migration-time offset
//! 7. Diffusional band width per regime, added to the well width
//! 8. Gaussian peak intensities, normalised by exposure

use std::sync::Arc;

use log::{debug, info, warn};

use crate::calibration::CalibrationStore;
use crate::diffusion::{DiffusionInputs, DiffusionModel, DiffusionRegime, PolymerConstants};
use crate::error::{GelError, Result};
use crate::ferguson::ferguson_to_mu0;
use crate::gel::config::{BandwidthMode, Geometry, ProbeGrid, RunConfiguration};
use crate::gel::intensity;
use crate::gel::render::{RenderFrame, DEFAULT_RESOLUTION_PX_PER_IN};
use crate::gel::result::GelRun;
use crate::mobility::MobilityModel;
use crate::sample::{fill_missing_quantities, DnaFragment, Fragment, Sample, DEFAULT_MAX_QUANTITY_NG};
use crate::units::{Dimension, Quantity};

/// Fraction of the well volume loaded when a sample has no volume
pub const DEFAULT_FILL_FRACTION: f64 = 0.85;

/// Agarose concentration as a plain percentage
///
/// Accepts a mass concentration (1 % = 1 g per 100 ml) or a dimensionless
/// value in `%`.
pub fn percent_value(percent: &Quantity) -> Result<f64> {
    match percent.dimension() {
        Dimension::MASS_CONCENTRATION => percent.value_in("g/(100 ml)"),
        Dimension::DIMENSIONLESS => percent.value_in("%"),
        found => Err(GelError::dimensionality(
            "gel concentration",
            Dimension::MASS_CONCENTRATION,
            found,
        )),
    }
}

#[derive(Debug, Clone)]
enum GelState {
    Configured,
    Run(Box<GelRun>),
}

/// Lanes of samples plus the physical run parameters
#[derive(Debug, Clone)]
pub struct Gel<F = DnaFragment> {
    samples: Vec<Sample<F>>,
    names: Vec<String>,
    percent: Quantity,
    field: Quantity,
    temperature: Quantity,
    gel_length: Quantity,
    well_width: Quantity,
    well_height: Quantity,
    well_depth: Option<Quantity>,
    well_separation: Quantity,
    probes: ProbeGrid,
    store: Arc<CalibrationStore>,
    constants: PolymerConstants,
    state: GelState,
}

/// Per-lane values computed inside a run
struct LaneBands {
    well: Vec<f64>,
    diffusion: Vec<f64>,
    regimes: Vec<DiffusionRegime>,
}

impl<F: Fragment + Clone + PartialEq> Gel<F> {
    /// A 1 % gel at 5 V/cm and 295.15 K, 8 cm long, with 7 × 2 × 1 mm wells
    /// 2 mm apart, lanes named `lane1`, `lane2`, …
    pub fn new(samples: Vec<Sample<F>>) -> Result<Self> {
        let names = (1..=samples.len()).map(|i| format!("lane{}", i)).collect();
        Self::with_names(samples, names)
    }

    /// Like [`Gel::new`] with explicit lane names
    pub fn with_names(samples: Vec<Sample<F>>, names: Vec<String>) -> Result<Self> {
        if names.len() != samples.len() {
            return Err(GelError::invalid(format!(
                "{} lane names for {} samples",
                names.len(),
                samples.len()
            )));
        }
        Ok(Self {
            samples,
            names,
            percent: Quantity::new(1.0, "%")?,
            field: Quantity::new(5.0, "V/cm")?,
            temperature: Quantity::new(295.15, "K")?,
            gel_length: Quantity::new(8.0, "cm")?,
            well_width: Quantity::new(7.0, "mm")?,
            well_height: Quantity::new(2.0, "mm")?,
            well_depth: Some(Quantity::new(1.0, "mm")?),
            well_separation: Quantity::new(2.0, "mm")?,
            probes: ProbeGrid::default(),
            store: CalibrationStore::builtin(),
            constants: PolymerConstants::default(),
            state: GelState::Configured,
        })
    }

    /// Use another calibration store (e.g. synthetic data)
    pub fn with_calibration_store(mut self, store: Arc<CalibrationStore>) -> Self {
        self.store = store;
        self.state = GelState::Configured;
        self
    }

    // =============================================================================================
    // Accessors
    // =============================================================================================

    pub fn samples(&self) -> &[Sample<F>] {
        &self.samples
    }

    pub fn lane_names(&self) -> &[String] {
        &self.names
    }

    pub fn n_lanes(&self) -> usize {
        self.samples.len()
    }

    pub fn percent(&self) -> &Quantity {
        &self.percent
    }

    pub fn field(&self) -> &Quantity {
        &self.field
    }

    pub fn temperature(&self) -> &Quantity {
        &self.temperature
    }

    pub fn gel_length(&self) -> &Quantity {
        &self.gel_length
    }

    pub fn well_width(&self) -> &Quantity {
        &self.well_width
    }

    pub fn well_height(&self) -> &Quantity {
        &self.well_height
    }

    pub fn well_depth(&self) -> Option<&Quantity> {
        self.well_depth.as_ref()
    }

    pub fn well_separation(&self) -> &Quantity {
        &self.well_separation
    }

    pub fn probes(&self) -> &ProbeGrid {
        &self.probes
    }

    pub fn is_run(&self) -> bool {
        matches!(self.state, GelState::Run(_))
    }

    /// Result of the last run, or [`GelError::NotRun`]
    pub fn result(&self) -> Result<&GelRun> {
        match &self.state {
            GelState::Run(run) => Ok(run),
            GelState::Configured => Err(GelError::NotRun),
        }
    }

    // =============================================================================================
    // Setters: each checks the dimension and returns the gel to Configured
    // =============================================================================================

    fn changed(&mut self) {
        self.state = GelState::Configured;
    }

    pub fn set_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.samples.len() {
            return Err(GelError::invalid(format!(
                "{} lane names for {} samples",
                names.len(),
                self.samples.len()
            )));
        }
        self.names = names;
        self.changed();
        Ok(())
    }

    pub fn set_percent(&mut self, percent: Quantity) -> Result<()> {
        let value = percent_value(&percent)?;
        if !(value.is_finite() && value > 0.0) {
            return Err(GelError::invalid(format!("gel concentration must be positive, got {}", percent)));
        }
        self.percent = percent;
        self.changed();
        Ok(())
    }

    pub fn set_field(&mut self, field: Quantity) -> Result<()> {
        self.field = positive(field, Dimension::FIELD, "electric field")?;
        self.changed();
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: Quantity) -> Result<()> {
        self.temperature = positive(temperature, Dimension::TEMPERATURE, "temperature")?;
        self.changed();
        Ok(())
    }

    pub fn set_gel_length(&mut self, length: Quantity) -> Result<()> {
        self.gel_length = positive(length, Dimension::LENGTH, "gel length")?;
        self.changed();
        Ok(())
    }

    pub fn set_well_width(&mut self, width: Quantity) -> Result<()> {
        self.well_width = positive(width, Dimension::LENGTH, "well width")?;
        self.changed();
        Ok(())
    }

    pub fn set_well_height(&mut self, height: Quantity) -> Result<()> {
        self.well_height = positive(height, Dimension::LENGTH, "well height")?;
        self.changed();
        Ok(())
    }

    /// `None` when the well depth is unknown
    pub fn set_well_depth(&mut self, depth: Option<Quantity>) -> Result<()> {
        self.well_depth = depth
            .map(|d| positive(d, Dimension::LENGTH, "well depth"))
            .transpose()?;
        self.changed();
        Ok(())
    }

    pub fn set_well_separation(&mut self, separation: Quantity) -> Result<()> {
        separation.expect_dimension(Dimension::LENGTH, "well separation")?;
        self.well_separation = separation;
        self.changed();
        Ok(())
    }

    pub fn set_probes(&mut self, probes: ProbeGrid) -> Result<()> {
        probes.validate()?;
        self.probes = probes;
        self.changed();
        Ok(())
    }

    /// Probe lengths for the vWBR fit
    pub fn set_vwbr_probe_lengths(&mut self, lengths: Vec<f64>) -> Result<()> {
        let probes = ProbeGrid {
            vwbr_lengths: lengths,
            ..self.probes.clone()
        };
        self.set_probes(probes)
    }

    /// Probe lengths for the μ0 extrapolation
    pub fn set_mu0_probe_lengths(&mut self, lengths: Vec<f64>) -> Result<()> {
        let probes = ProbeGrid {
            mu0_lengths: lengths,
            ..self.probes.clone()
        };
        self.set_probes(probes)
    }

    /// Gel strengths \[%\] for the μ0 extrapolation
    pub fn set_mu0_percents(&mut self, percents: Option<Vec<f64>>) -> Result<()> {
        let probes = ProbeGrid {
            mu0_percents: percents,
            ..self.probes.clone()
        };
        self.set_probes(probes)
    }

    pub fn set_polymer_constants(&mut self, constants: PolymerConstants) {
        self.constants = constants;
        self.changed();
    }

    // =============================================================================================
    // Derived geometry
    // =============================================================================================

    /// Volume of one well \[µl\], if its depth is known
    pub fn well_volume(&self) -> Result<Option<f64>> {
        let Some(depth) = &self.well_depth else {
            return Ok(None);
        };
        let volume = &(&self.well_width * &self.well_height) * depth;
        Ok(Some(volume.value_in("ul")?))
    }

    /// Loaded volume per lane \[µl\]: the sample's own, or 85 % of the well
    fn lane_volumes(&self) -> Result<Vec<f64>> {
        let default = self.well_volume()?.map_or(f64::NAN, |v| DEFAULT_FILL_FRACTION * v);
        self.samples
            .iter()
            .map(|s| {
                if s.volume().is_nan() {
                    Ok(default)
                } else {
                    s.volume().value_in("ul")
                }
            })
            .collect()
    }

    /// Starting band height \[cm\] for a lane holding `volume` µl
    fn initial_band_height(&self, geometry: Geometry, volume: f64) -> Result<f64> {
        let height = self.well_height.value_in("cm")?;
        match (geometry, &self.well_depth) {
            (Geometry::Horizontal, _) => Ok(height),
            (Geometry::Vertical, Some(depth)) if volume.is_finite() => {
                let footprint = self.well_width.value_in("cm")? * depth.value_in("cm")?;
                // 1 µl = 1e-3 cm³
                Ok(volume * 1e-3 / footprint)
            }
            _ => Ok(0.5 * height),
        }
    }

    // =============================================================================================
    // Run
    // =============================================================================================

    /// Simulate the run and store the result
    ///
    /// # Errors
    ///
    /// Any failure of a step (invalid configuration, undefined interpolation,
    /// undefined fit or μ0, failed crossover search) aborts the run; the gel
    /// is left Configured.
    pub fn run(&mut self, config: &RunConfiguration) -> Result<&GelRun> {
        self.changed();
        config.validate()?;
        self.probes.validate()?;

        let field = self.field.value_in("V/cm")?;
        let percent = percent_value(&self.percent)?;
        let temperature = self.temperature.value_in("K")?;
        let exposure = config.exposure_clamped();
        info!(
            "gel run: {} lanes, E = {} V/cm, {} % agarose, T = {} K, {} dataset",
            self.n_lanes(),
            field,
            percent,
            temperature,
            config.dataset
        );

        let set = self.store.get(config.dataset)?;
        let model = MobilityModel::new(set, config.interpolation, config.replace_nans);
        let lengths: Vec<Vec<f64>> = self
            .samples
            .iter()
            .map(|s| s.solutes().iter().map(Fragment::length_bp).collect())
            .collect();
        if lengths.iter().all(Vec::is_empty) {
            return Err(GelError::invalid("gel has no fragments to run"));
        }

        // 1. Mobilities
        let mobilities = map_lanes(&lengths, |lane| model.mobility_curve_at(field, percent, lane))
            .into_iter()
            .collect::<Result<Vec<Vec<f64>>>>()?;
        let max_mobility = mobilities
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        // 2. vWBR parameters
        let vwbr = model.fit_transport_params(field, percent, &self.probes.vwbr_lengths)?;

        // 3. Run time
        let max_distance = config.till_len * self.gel_length.value_in("cm")?;
        let mut run_time = max_distance / (max_mobility * field);
        if let Some(limit) = config.till_time
            && limit < run_time
        {
            run_time = limit;
        }

        // 4. Distances
        let distances: Vec<Vec<f64>> = mobilities
            .iter()
            .map(|lane| lane.iter().map(|mu| run_time * mu * field).collect())
            .collect();

        // 5. Free-solution mobility
        let percents = match &self.probes.mu0_percents {
            Some(p) => p.clone(),
            None => set.distinct_percents(),
        };
        let ferguson = ferguson_to_mu0(&model, field, &percents, &self.probes.mu0_lengths)?;
        let mu0 = ferguson.require_mu0()?;
        let mu0_below_mu_s = mu0 < vwbr.params.mu_s;
        if mu0_below_mu_s {
            warn!(
                "free-solution mobility {:.4e} cm²/(V·s) is below the fitted muS {:.4e} cm²/(V·s)",
                mu0, vwbr.params.mu_s
            );
        }

        // 6. & 7. Band widths
        let volumes = self.lane_volumes()?;
        let band_heights = volumes
            .iter()
            .map(|v| self.initial_band_height(config.geometry, *v))
            .collect::<Result<Vec<f64>>>()?;
        let diffusion = DiffusionModel::new(
            DiffusionInputs {
                temperature,
                field: field * 1e2,
                mu0: mu0 * 1e-4,
                mu_l: vwbr.params.mu_l * 1e-4,
                gamma: vwbr.params.gamma,
                percent,
            },
            self.constants,
            config.zimm_rouse_guess_bp,
        )?;

        let lanes: Vec<(usize, &Vec<f64>)> = lengths.iter().enumerate().collect();
        let bands: Vec<LaneBands> = map_lanes(&lanes, |(i, lane)| {
            let time0 = band_heights[*i] / (mu0 * field);
            let mut out = LaneBands {
                well: Vec::with_capacity(lane.len()),
                diffusion: Vec::with_capacity(lane.len()),
                regimes: Vec::with_capacity(lane.len()),
            };
            for (j, &nbp) in lane.iter().enumerate() {
                out.well.push(mobilities[*i][j] * time0 * field);
                let (regime, width_m) = diffusion.band_broadening(nbp, run_time);
                out.diffusion.push(width_m * 1e2);
                out.regimes.push(regime);
            }
            out
        });

        let mut well_bandwidths = Vec::with_capacity(bands.len());
        let mut diffusion_bandwidths = Vec::with_capacity(bands.len());
        let mut regimes = Vec::with_capacity(bands.len());
        for lane in bands {
            well_bandwidths.push(lane.well);
            diffusion_bandwidths.push(lane.diffusion);
            regimes.push(lane.regimes);
        }
        let bandwidths: Vec<Vec<f64>> = well_bandwidths
            .iter()
            .zip(&diffusion_bandwidths)
            .map(|(w, d)| w.iter().zip(d).map(|(a, b)| a + b).collect())
            .collect();

        // 8. Intensities
        let quantities: Vec<Vec<f64>> =
            fill_missing_quantities(&self.samples, &Quantity::new(DEFAULT_MAX_QUANTITY_NG, "ng")?)?
                .into_iter()
                .map(|lane| lane.iter().map(Quantity::magnitude).collect())
                .collect();
        let selected = match config.bandwidth_mode {
            BandwidthMode::Both => &bandwidths,
            BandwidthMode::WellOnly => &well_bandwidths,
            BandwidthMode::DiffusionOnly => &diffusion_bandwidths,
        };
        let raw: Vec<Vec<f64>> = quantities
            .iter()
            .zip(selected)
            .map(|(q, w)| {
                q.iter()
                    .zip(w)
                    .map(|(q, w)| intensity::raw_intensity(*q, *w, config.fwtm))
                    .collect()
            })
            .collect();
        let intensities = intensity::normalize(&raw, exposure);

        for (name, lane) in self.names.iter().zip(&regimes) {
            debug!("{}: regimes {:?}", name, lane);
        }
        info!(
            "gel run done: t = {:.0} s, muS = {:.4e}, muL = {:.4e}, gamma = {:.0} bp, mu0 = {:.4e} cm²/(V·s)",
            run_time, vwbr.params.mu_s, vwbr.params.mu_l, vwbr.params.gamma, mu0
        );

        let labels = self
            .samples
            .iter()
            .map(|s| s.solutes().iter().map(Fragment::label).collect())
            .collect();
        let run = GelRun {
            lane_names: self.names.clone(),
            labels,
            lengths,
            quantities,
            volumes,
            mobilities,
            distances,
            well_bandwidths,
            diffusion_bandwidths,
            bandwidths,
            intensities,
            regimes,
            bandwidth_mode: config.bandwidth_mode,
            fwtm: config.fwtm,
            exposure,
            run_time,
            mu0,
            mu0_below_mu_s,
            vwbr,
            ferguson,
            diffusion: diffusion.summary(),
        };
        self.state = GelState::Run(Box::new(run));
        self.result()
    }

    /// Package the last run for a renderer
    ///
    /// `resolution` is in pixels per length (default 500 px/in).
    pub fn render_frame(&self, resolution: Option<&Quantity>) -> Result<RenderFrame> {
        let run = self.result()?;
        let resolution = match resolution {
            Some(r) => r.clone(),
            None => Quantity::new(DEFAULT_RESOLUTION_PX_PER_IN, "px/in")?,
        };
        resolution.expect_dimension(Dimension::LENGTH.recip(), "resolution")?;

        Ok(RenderFrame {
            lane_names: run.lane_names.clone(),
            distances: run.distances.clone(),
            bandwidths: run.effective_bandwidths().to_vec(),
            intensities: run.intensities.clone(),
            well_width: self.well_width.value_in("cm")?,
            well_height: self.well_height.value_in("cm")?,
            well_separation: self.well_separation.value_in("cm")?,
            gel_length: self.gel_length.value_in("cm")?,
            resolution: resolution.value_in("px/cm")?,
            run_time: run.run_time,
            field: self.field.value_in("V/cm")?,
            percent: percent_value(&self.percent)?,
            temperature: self.temperature.value_in("K")?,
            exposure: run.exposure,
        })
    }
}

fn positive(q: Quantity, dimension: Dimension, what: &str) -> Result<Quantity> {
    q.expect_dimension(dimension, what)?;
    if !(q.magnitude().is_finite() && q.magnitude() > 0.0) {
        return Err(GelError::invalid(format!("{} must be positive, got {}", what, q)));
    }
    Ok(q)
}

/// Apply `f` to every lane, in parallel with the `parallel` feature
///
/// Output order always matches input order.
fn map_lanes<T, R, G>(lanes: &[T], f: G) -> Vec<R>
where
    T: Sync,
    R: Send,
    G: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        lanes.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        lanes.iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationPoint, CalibrationSet, DatasetName};
    use approx::assert_relative_eq;

    fn ul(v: f64) -> Quantity {
        Quantity::new(v, "ul").unwrap()
    }

    /// Every point shares one vWBR triple, so interpolation is exact everywhere
    fn uniform_store() -> Arc<CalibrationStore> {
        let mut points = Vec::new();
        for field in [1.0, 3.0, 5.0, 7.0] {
            for percent in [0.5_f64, 1.0, 1.5, 2.0] {
                let mu_s = 3.0e-4 * (-0.3 * percent).exp();
                let mu_l = 0.6e-4 * (-0.3 * percent).exp();
                points.push(CalibrationPoint::new(field, percent, mu_s, mu_l, 6000.0));
            }
        }
        let set = CalibrationSet::new(points).unwrap();
        Arc::new(CalibrationStore::new([(DatasetName::Vertical, set)]))
    }

    fn gel() -> Gel {
        let a = Sample::new(DnaFragment::from_lengths(&[500, 1000, 5000]), vec![], ul(10.0)).unwrap();
        let b = Sample::new(DnaFragment::from_lengths(&[2000, 8000]), vec![], Quantity::new(f64::NAN, "ul").unwrap())
            .unwrap();
        Gel::new(vec![a, b]).unwrap().with_calibration_store(uniform_store())
    }

    #[test]
    fn test_defaults_and_names() {
        let g = gel();
        assert_eq!(g.lane_names(), ["lane1", "lane2"]);
        assert_relative_eq!(percent_value(g.percent()).unwrap(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(g.well_volume().unwrap().unwrap(), 14.0, max_relative = 1e-9);
        assert!(matches!(g.result(), Err(GelError::NotRun)));
    }

    #[test]
    fn test_percent_accepts_mass_concentration() {
        let q = Quantity::new(15.0, "g/l").unwrap();
        assert_relative_eq!(percent_value(&q).unwrap(), 1.5, max_relative = 1e-9);
        assert!(percent_value(&Quantity::new(1.0, "cm").unwrap()).is_err());
    }

    #[test]
    fn test_setters_check_dimensions() {
        let mut g = gel();
        assert!(g.set_field(Quantity::new(5.0, "V").unwrap()).is_err());
        assert!(g.set_temperature(Quantity::new(-3.0, "K").unwrap()).is_err());
        assert!(g.set_names(vec!["only one".into()]).is_err());
        assert!(g.set_field(Quantity::new(3.0, "V/cm").unwrap()).is_ok());
    }

    #[test]
    fn test_run_then_setter_resets_state() {
        let mut g = gel();
        g.run(&RunConfiguration::default()).unwrap();
        assert!(g.is_run());
        g.set_temperature(Quantity::new(300.0, "K").unwrap()).unwrap();
        assert!(!g.is_run());
    }

    #[test]
    fn test_run_shapes_and_order() {
        let mut g = gel();
        let run = g.run(&RunConfiguration::default()).unwrap();
        assert_eq!(run.n_lanes(), 2);
        assert_eq!(run.distances[0].len(), 3);
        assert_eq!(run.distances[1].len(), 2);
        assert_eq!(run.lengths[1], vec![2000.0, 8000.0]);
        // shorter fragments run further
        assert!(run.distances[0][0] > run.distances[0][1]);
        assert!(run.distances[0][1] > run.distances[0][2]);
        // the fastest band stops at 75 % of 8 cm
        let max = run.distances.iter().flatten().copied().fold(0.0, f64::max);
        assert_relative_eq!(max, 6.0, max_relative = 1e-9);
    }

    #[test]
    fn test_run_bandwidths_add() {
        let mut g = gel();
        let run = g.run(&RunConfiguration::default()).unwrap();
        for lane in 0..run.n_lanes() {
            for j in 0..run.lengths[lane].len() {
                let total = run.well_bandwidths[lane][j] + run.diffusion_bandwidths[lane][j];
                assert_relative_eq!(run.bandwidths[lane][j], total, max_relative = 1e-12);
                assert!(run.diffusion_bandwidths[lane][j] > 0.0);
            }
        }
    }

    #[test]
    fn test_default_volume_and_quantities() {
        let mut g = gel();
        let run = g.run(&RunConfiguration::default()).unwrap();
        assert_relative_eq!(run.volumes[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(run.volumes[1], 0.85 * 14.0, max_relative = 1e-9);
        // no quantity known anywhere: the longest fragment of each lane gets 150 ng
        assert_relative_eq!(run.quantities[0][2], 150.0, max_relative = 1e-12);
        assert_relative_eq!(run.quantities[1][1], 150.0, max_relative = 1e-12);
    }

    #[test]
    fn test_time_limit_caps_run() {
        let mut g = gel();
        let run = g
            .run(&RunConfiguration::default().with_till_time(Some(60.0)))
            .unwrap();
        assert_relative_eq!(run.run_time, 60.0);
    }

    #[test]
    fn test_exposure_normalisation() {
        let mut g = gel();
        let run = g
            .run(&RunConfiguration::default().with_exposure(0.0))
            .unwrap();
        let max = run.intensities.iter().flatten().copied().fold(0.0, f64::max);
        assert_relative_eq!(max, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_well_only_mode_uses_well_widths() {
        let mut g = gel();
        let config = RunConfiguration::default().with_bandwidth_mode(BandwidthMode::WellOnly);
        let run = g.run(&config).unwrap();
        assert_eq!(run.effective_bandwidths(), &run.well_bandwidths[..]);
    }

    #[test]
    fn test_missing_dataset_fails_and_stays_configured() {
        let mut g = gel();
        let config = RunConfiguration::default().with_dataset(DatasetName::Horizontal);
        assert!(g.run(&config).is_err());
        assert!(!g.is_run());
    }

    #[test]
    fn test_render_frame_resolution() {
        let mut g = gel();
        assert!(g.render_frame(None).is_err());
        g.run(&RunConfiguration::default()).unwrap();
        let frame = g.render_frame(None).unwrap();
        assert_relative_eq!(frame.resolution, 500.0 / 2.54, max_relative = 1e-9);
        assert_eq!(frame.distances.len(), 2);
        assert!(g.render_frame(Some(&Quantity::new(1.0, "cm").unwrap())).is_err());
    }
}
