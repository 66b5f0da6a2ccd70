//! Samples loaded into the gel
//!
//! # Organization
//!
//! - **fragment**: the [`Fragment`] trait and [`DnaFragment`]
//! - **ledger**: [`Sample`], the solute/quantity/volume ledger
//! - **quantities**: linear quantity assignment helpers
//! - **ladder**: preset size markers
//!
//! # Example
//!
//! ```rust
//! use gel_rs::sample::{DnaFragment, Sample};
//! use gel_rs::units::Quantity;
//!
//! let mut digest = Sample::new(
//!     DnaFragment::from_lengths(&[500, 1000, 5000]),
//!     vec![],
//!     Quantity::new(20.0, "ul").unwrap(),
//! )
//! .unwrap();
//! let lane = digest.aliquot(&Quantity::new(5.0, "ul").unwrap()).unwrap();
//! assert_eq!(lane.len(), 3);
//! assert!((digest.volume().magnitude() - 15.0).abs() < 1e-12);
//! ```

pub mod fragment;
pub mod ladder;
pub mod ledger;
pub mod quantities;

pub use fragment::{DnaFragment, Fragment};
pub use ladder::{ladder, ladder_from_info, LadderPreset, LADDERS};
pub use ledger::{Dilution, Sample};
pub use quantities::{
    assign_quantities, fill_missing_quantities, lindiv_by_length, lindiv_quantity, logspace_int,
    DEFAULT_MAX_QUANTITY_NG,
};
