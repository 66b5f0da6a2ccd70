//! Plots of gel runs (PNG/SVG via plotters)
//!
//! # Organization
//!
//! - **config**: shared plot configuration ([`PlotConfig`])
//! - **diagnostics**: vWBR fit, Ferguson plot and lane profiles

pub mod config;
pub mod diagnostics;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use diagnostics::{plot_ferguson, plot_lane_profiles, plot_vwbr_fit};
