//! Gel runs
//!
//! # Organization
//!
//! - **config**: [`RunConfiguration`], [`Geometry`], [`BandwidthMode`], [`ProbeGrid`]
//! - **engine**: [`Gel`], which owns the lanes and performs the run
//! - **intensity**: Gaussian band profiles and exposure normalisation
//! - **result**: [`GelRun`] and the [`Band`] table view
//! - **render**: [`RenderFrame`] for image renderers
//!
//! # Example
//!
//! ```rust,no_run
//! use gel_rs::gel::{Gel, RunConfiguration};
//! use gel_rs::sample::ladder;
//!
//! let mut gel = Gel::new(vec![ladder("1kb_GeneRuler").unwrap()]).unwrap();
//! let run = gel.run(&RunConfiguration::default()).unwrap();
//! println!("ran for {:.0} s", run.run_time);
//! ```

pub mod config;
pub mod engine;
pub mod intensity;
pub mod render;
pub mod result;

pub use config::{linspace, BandwidthMode, Geometry, ProbeGrid, RunConfiguration};
pub use engine::{percent_value, Gel, DEFAULT_FILL_FRACTION};
pub use render::{RenderFrame, DEFAULT_RESOLUTION_PX_PER_IN};
pub use result::{Band, GelRun};
