//! Physical quantities with dimensional checking
//!
//! Every public operation that accepts a physical quantity (volumes, masses,
//! fields, temperatures, lengths, times) takes a [`Quantity`] and verifies its
//! [`Dimension`] before converting to the fixed internal units used by the
//! numerics.
//!
//! # Internal units
//!
//! | Concern          | Internal unit   |
//! |------------------|-----------------|
//! | Mobility         | cm²/(V·s)       |
//! | Field            | V/cm            |
//! | Distance on gel  | cm              |
//! | Time             | s               |
//! | Fragment length  | bp              |
//! | Diffusion        | m²/s (SI)       |
//!
//! # Example
//!
//! ```rust
//! use gel_rs::units::{Dimension, Quantity};
//!
//! let field = Quantity::new(500.0, "V/m").unwrap();
//! field.expect_dimension(Dimension::FIELD, "field").unwrap();
//! assert!((field.value_in("V/cm").unwrap() - 5.0).abs() < 1e-12);
//! ```

pub mod dimension;
pub mod quantity;
pub mod unit;

pub use dimension::Dimension;
pub use quantity::{Amounts, Quantity};
pub use unit::Unit;
