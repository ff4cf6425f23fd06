//! Sequential and Rayon stencil evaluation must agree bit for bit
//!
//! Kept in its own test binary: it changes the process-wide parallel
//! threshold.

#![cfg(feature = "parallel")]

use kdv_rs::simulation::Simulation;
use kdv_rs::solver::{parallel_threshold, set_parallel_threshold};

mod common;
use common::soliton_config;

#[test]
fn test_parallel_matches_sequential() {
    let config = soliton_config(0.5, 0.25, 0.01, 1.0).with_velocity(true);
    let simulation = Simulation::new(config).unwrap();
    let previous = parallel_threshold();

    // 160 points: below the default threshold, then forced onto Rayon
    set_parallel_threshold(10_000);
    let sequential = simulation.run().unwrap();

    set_parallel_threshold(1);
    let parallel = simulation.run().unwrap();

    set_parallel_threshold(previous);

    assert_eq!(sequential.result.history, parallel.result.history);
    assert_eq!(sequential.diagnostics, parallel.diagnostics);
}
