//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ExponentialDecay, LinearAdvection};
pub use test_helpers::{max_abs_diff, relative_error, soliton_config, unit_impulse};
