//! What a gel run produces
//!
//! Every per-band array is indexed `[lane][fragment]` in the order the
//! fragments were given in their samples.

use crate::diffusion::{DiffusionRegime, DiffusionSummary};
use crate::ferguson::FergusonResult;
use crate::gel::config::BandwidthMode;
use crate::gel::intensity;
use crate::mobility::VwbrFit;

/// Results of one [`Gel::run`](crate::gel::Gel::run)
#[derive(Debug, Clone)]
pub struct GelRun {
    pub lane_names: Vec<String>,
    /// Fragment labels
    pub labels: Vec<Vec<String>>,
    /// Fragment lengths \[bp\]
    pub lengths: Vec<Vec<f64>>,
    /// Quantities after filling missing ones \[ng\]
    pub quantities: Vec<Vec<f64>>,
    /// Loaded volume per lane \[µl\]; NaN when neither given nor derivable
    pub volumes: Vec<f64>,
    /// \[cm²/(V·s)\]
    pub mobilities: Vec<Vec<f64>>,
    /// Migration distance from the well \[cm\]
    pub distances: Vec<Vec<f64>>,
    /// Width inherited from the well \[cm\]
    pub well_bandwidths: Vec<Vec<f64>>,
    /// Width from diffusion over the run \[cm\]
    pub diffusion_bandwidths: Vec<Vec<f64>>,
    /// Well plus diffusion width \[cm\]
    pub bandwidths: Vec<Vec<f64>>,
    /// Peak intensities normalised by the saturation threshold
    pub intensities: Vec<Vec<f64>>,
    pub regimes: Vec<Vec<DiffusionRegime>>,
    /// Band widths that fed the intensities
    pub bandwidth_mode: BandwidthMode,
    /// Widths were read as full width at tenth maximum
    pub fwtm: bool,
    /// Exposure after clamping
    pub exposure: f64,
    /// \[s\]
    pub run_time: f64,
    /// Free-solution mobility \[cm²/(V·s)\]
    pub mu0: f64,
    /// μ0 came out below the fitted μS, which is physically inconsistent
    pub mu0_below_mu_s: bool,
    pub vwbr: VwbrFit,
    pub ferguson: FergusonResult,
    pub diffusion: DiffusionSummary,
}

/// One row of the band table
#[derive(Debug, Clone, PartialEq)]
pub struct Band<'a> {
    pub lane: usize,
    pub lane_name: &'a str,
    pub label: &'a str,
    pub length: f64,
    pub quantity: f64,
    pub mobility: f64,
    pub distance: f64,
    pub well_bandwidth: f64,
    pub diffusion_bandwidth: f64,
    pub bandwidth: f64,
    pub intensity: f64,
    pub regime: DiffusionRegime,
}

impl GelRun {
    pub fn n_lanes(&self) -> usize {
        self.lane_names.len()
    }

    pub fn n_bands(&self) -> usize {
        self.lengths.iter().map(Vec::len).sum()
    }

    /// Band widths selected by `mode`
    pub fn bandwidths_for(&self, mode: BandwidthMode) -> &[Vec<f64>] {
        match mode {
            BandwidthMode::Both => &self.bandwidths,
            BandwidthMode::WellOnly => &self.well_bandwidths,
            BandwidthMode::DiffusionOnly => &self.diffusion_bandwidths,
        }
    }

    /// Band widths used for the intensities of this run
    pub fn effective_bandwidths(&self) -> &[Vec<f64>] {
        self.bandwidths_for(self.bandwidth_mode)
    }

    /// Run time as (hours, minutes, seconds)
    pub fn run_time_hms(&self) -> (u64, u64, f64) {
        let total = self.run_time.max(0.0);
        let hours = (total / 3600.0).floor();
        let minutes = ((total - hours * 3600.0) / 60.0).floor();
        (hours as u64, minutes as u64, total - hours * 3600.0 - minutes * 60.0)
    }

    /// Summed Gaussian intensity of lane `lane` at each position in `xs` \[cm\]
    ///
    /// Each band peaks at its normalised intensity; bands with a
    /// non-positive or non-finite width are skipped.
    pub fn lane_profile(&self, lane: usize, xs: &[f64]) -> Vec<f64> {
        let widths = &self.effective_bandwidths()[lane];
        let bands: Vec<(f64, f64, f64)> = self.distances[lane]
            .iter()
            .zip(widths)
            .zip(&self.intensities[lane])
            .filter(|((_, w), h)| w.is_finite() && **w > 0.0 && h.is_finite())
            .map(|((d, w), h)| {
                let fwhm = if self.fwtm { intensity::fwhm_from_fwtm(*w) } else { *w };
                (*h, *d, intensity::std_dev_from_fwhm(fwhm))
            })
            .collect();
        xs.iter()
            .map(|&x| bands.iter().map(|&(h, c, dev)| intensity::gaussian(x, h, c, dev)).sum())
            .collect()
    }

    /// Every band, lane by lane
    pub fn bands(&self) -> Vec<Band<'_>> {
        let mut out = Vec::with_capacity(self.n_bands());
        for (lane, name) in self.lane_names.iter().enumerate() {
            for j in 0..self.lengths[lane].len() {
                out.push(Band {
                    lane,
                    lane_name: name,
                    label: &self.labels[lane][j],
                    length: self.lengths[lane][j],
                    quantity: self.quantities[lane][j],
                    mobility: self.mobilities[lane][j],
                    distance: self.distances[lane][j],
                    well_bandwidth: self.well_bandwidths[lane][j],
                    diffusion_bandwidth: self.diffusion_bandwidths[lane][j],
                    bandwidth: self.bandwidths[lane][j],
                    intensity: self.intensities[lane][j],
                    regime: self.regimes[lane][j],
                });
            }
        }
        out
    }
}
