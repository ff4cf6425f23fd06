//! Helper functions for integration tests

use kdv_rs::config::SimulationConfig;
use kdv_rs::models::{InitialCondition, SpatialOperator};
use kdv_rs::physics::Field;

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Largest pointwise difference between two fields of the same length
pub fn max_abs_diff(a: &Field, b: &Field) -> f64 {
    assert_eq!(a.len(), b.len(), "Dimension mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Single soliton of parameter `alpha` at the origin, full KdV operator
///
/// The ring `[-10, 30)` leaves room for the pulse to travel right.
pub fn soliton_config(alpha: f64, h: f64, dt: f64, t_max: f64) -> SimulationConfig {
    SimulationConfig::default()
        .with_domain(-10.0, 30.0, h)
        .with_time(dt, t_max)
        .with_operator(SpatialOperator::Full)
        .with_initial(InitialCondition::soliton(alpha, 0.0))
}

/// Field of `points` zeros with a single 1 at `index`
pub fn unit_impulse(points: usize, index: usize) -> InitialCondition {
    let mut field = Field::zeros(points);
    field[index] = 1.0;
    InitialCondition::Custom(field)
}
