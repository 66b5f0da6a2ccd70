//! gel-rs: Agarose Gel Electrophoresis Simulation
//!
//! Predicts where DNA fragments end up on an agarose gel, how wide and how
//! bright their bands are, and keeps the books on the samples loaded into
//! the wells.
//!
//! # Architecture
//!
//! 1. **Calibration and mobility**
//!    - Reference vWBR triples (μS, μL, γ) over the (field, %agarose) plane
//!    - Scattered interpolation at the requested condition, then a
//!      least-squares fit of the run-wide vWBR parameters
//!
//! 2. **Band physics**
//!    - Free-solution mobility from a Ferguson extrapolation
//!    - Diffusional broadening in four polymer regimes
//!    - Gaussian bands whose area is the loaded quantity
//!
//! 3. **Samples**
//!    - Solutes with quantities and a volume, with aliquot, dilution and
//!      mixing operations checked for physical dimensions
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gel_rs::prelude::*;
//!
//! # fn main() -> gel_rs::Result<()> {
//! let digest = Sample::new(
//!     DnaFragment::from_lengths(&[500, 1200, 3000, 8000]),
//!     vec![],
//!     Quantity::new(10.0, "ul")?,
//! )?;
//! let mut gel = Gel::new(vec![ladder("1kb_GeneRuler")?, digest])?;
//! gel.set_field(Quantity::new(5.0, "V/cm")?)?;
//!
//! let run = gel.run(&RunConfiguration::default())?;
//! for band in run.bands() {
//!     println!("{} {}: {:.2} cm", band.lane_name, band.label, band.distance);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`units`]: quantities with dimensional checking
//! - [`calibration`]: built-in and user calibration data
//! - [`mobility`]: interpolation and vWBR fitting
//! - [`ferguson`]: free-solution mobility extrapolation
//! - [`diffusion`]: regime classification and band broadening
//! - [`sample`]: sample ledger, quantity helpers, ladders
//! - [`gel`]: the gel and its run
//! - [`output`]: CSV export and diagnostic plots

pub mod error;
pub mod units;

pub mod calibration;
pub mod diffusion;
pub mod ferguson;
pub mod mobility;

pub mod gel;
pub mod sample;

pub mod output;

pub use error::{GelError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use gel_rs::prelude::*;
    //! ```
    pub use crate::calibration::{CalibrationSet, CalibrationStore, DatasetName};
    pub use crate::error::{GelError, Result};
    pub use crate::gel::{BandwidthMode, Gel, GelRun, Geometry, RunConfiguration};
    pub use crate::mobility::{InterpolationMethod, MobilityModel};
    pub use crate::sample::{ladder, Dilution, DnaFragment, Fragment, Sample};
    pub use crate::units::{Dimension, Quantity};
}
