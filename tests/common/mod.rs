//! Common utilities for integration tests

pub mod synthetic;
pub mod test_helpers;

pub use synthetic::{scaled_store, uniform_triple, SCALE_RATE};
pub use test_helpers::{assert_non_increasing, digest, init_logging, relative_error, ul};
