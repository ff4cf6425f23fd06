//! Post-processing of a finished run
//!
//! Everything here reads a [`SimulationResult`] and never touches the
//! solver. Per time level:
//!
//! - **mass**: trapezoidal integral of the field
//! - **periodic integral**: `h·Σy`, the exactly conserved quantity
//! - **peak position / amplitude**: location and value of the maximum,
//!   zero from the first unstable step on
//!
//! plus an optional velocity series from [`VelocityEstimator`], computed
//! only for stable runs.
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::diagnostics::DiagnosticSeries;
//! use kdv_rs::models::{InitialCondition, KdvModel, SpatialOperator};
//! use kdv_rs::physics::Grid;
//! use kdv_rs::solver::{RK4Solver, Scenario, Solver};
//!
//! let grid = Grid::new(-10.0, 30.0, 0.5, 0.01, 0.5).unwrap();
//! let model = KdvModel::new(SpatialOperator::Full, &grid);
//! let initial = InitialCondition::soliton(0.5, 0.0).build(&grid).unwrap();
//! let scenario = Scenario::new(Box::new(model), grid.clone(), initial);
//! let result = RK4Solver::new().solve(&scenario).unwrap();
//!
//! let diagnostics = DiagnosticSeries::compute(&result, &grid, true).unwrap();
//! assert_eq!(diagnostics.mass.len(), result.len());
//! assert!(diagnostics.velocity.is_some());
//! ```

mod mass;
mod peak;
mod velocity;

pub use mass::{periodic_integral, trapezoidal_mass};
pub use peak::{PeakSeries, find_peak, track_peaks};
pub use velocity::{EstimatorState, VelocityEstimator, VelocitySeries};

use log::info;

use crate::error::{KdvError, Result};
use crate::physics::Grid;
use crate::solver::{SimulationResult, StabilityReport};

/// Diagnostic time series of one run
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticSeries {
    /// `t_j`, shared by every per-step series
    pub time_points: Vec<f64>,

    /// Trapezoidal integral per step
    pub mass: Vec<f64>,

    /// `h·Σy` per step
    pub periodic_integral: Vec<f64>,

    /// Grid coordinate of the maximum per step
    pub peak_position: Vec<f64>,

    /// Maximum value per step
    pub amplitude: Vec<f64>,

    /// Peak velocity with its own time stamps; `None` when not requested or
    /// when the run is unstable
    pub velocity: Option<VelocitySeries>,

    /// Copied from the run
    pub stability: StabilityReport,
}

impl DiagnosticSeries {
    /// Derive every series from `result`
    ///
    /// # Errors
    ///
    /// [`KdvError::ShapeMismatch`] when the history was not produced on
    /// `grid`.
    pub fn compute(result: &SimulationResult, grid: &Grid, compute_velocity: bool) -> Result<Self> {
        let history = &result.history;
        if !history.is_empty() && history.points() != grid.points() {
            return Err(KdvError::ShapeMismatch {
                expected: grid.points(),
                actual: history.points(),
            });
        }

        let h = grid.h();
        let mass = history.iter().map(|field| trapezoidal_mass(field, h)).collect();
        let periodic = history.iter().map(|field| periodic_integral(field, h)).collect();
        let peaks = track_peaks(history, grid, &result.stability);

        let velocity = match (compute_velocity, result.stability.is_stable()) {
            (true, true) => Some(VelocitySeries::estimate(
                &peaks.positions,
                &result.time_points,
                grid.t_max(),
            )?),
            (true, false) => {
                info!("velocity estimation skipped: the run is numerically unstable");
                None
            }
            (false, _) => None,
        };

        Ok(Self {
            time_points: result.time_points.clone(),
            mass,
            periodic_integral: periodic,
            peak_position: peaks.positions,
            amplitude: peaks.amplitudes,
            velocity,
            stability: result.stability,
        })
    }

    /// Number of time levels
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn is_stable(&self) -> bool {
        self.stability.is_stable()
    }

    /// Largest relative change of the trapezoidal mass against step 0
    ///
    /// `None` for an empty series or a zero initial mass.
    pub fn mass_drift(&self) -> Option<f64> {
        let initial = *self.mass.first()?;
        if initial == 0.0 {
            return None;
        }
        self.mass
            .iter()
            .map(|m| ((m - initial) / initial).abs())
            .reduce(f64::max)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Field;
    use crate::solver::{StateHistory, scan_stability};
    use approx::assert_relative_eq;

    fn grid() -> Grid {
        Grid::new(0.0, 4.0, 1.0, 1.0, 3.0).unwrap()
    }

    fn result(fields: Vec<Field>) -> SimulationResult {
        let history = StateHistory::from_fields(fields).unwrap();
        let stability = scan_stability(&history);
        let times = (0..history.len()).map(|j| j as f64).collect();
        SimulationResult::new(times, history, stability)
    }

    #[test]
    fn test_series_per_step() {
        let run = result(vec![
            Field::from_vec(vec![0.0, 2.0, 0.0, 0.0]),
            Field::from_vec(vec![0.0, 0.0, 2.0, 0.0]),
            Field::from_vec(vec![0.0, 0.0, 0.0, 2.0]),
        ]);

        let diagnostics = DiagnosticSeries::compute(&run, &grid(), true).unwrap();

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.peak_position, vec![1.0, 2.0, 3.0]);
        assert_eq!(diagnostics.amplitude, vec![2.0, 2.0, 2.0]);
        assert_relative_eq!(diagnostics.mass[0], 2.0);
        assert_relative_eq!(diagnostics.mass[2], 1.0);
        assert_eq!(diagnostics.periodic_integral, vec![2.0, 2.0, 2.0]);
        assert_relative_eq!(diagnostics.mass_drift().unwrap(), 0.5);

        let velocity = diagnostics.velocity.unwrap();
        assert_eq!(velocity.velocity, vec![1.0, 1.0]);
        assert_eq!(velocity.time_points, vec![0.0, 3.0]);
    }

    #[test]
    fn test_velocity_toggle() {
        let run = result(vec![Field::zeros(4), Field::zeros(4)]);

        let diagnostics = DiagnosticSeries::compute(&run, &grid(), false).unwrap();

        assert!(diagnostics.velocity.is_none());
        assert_eq!(diagnostics.mass_drift(), None);
    }

    #[test]
    fn test_unstable_run_suppresses_velocity() {
        let run = result(vec![
            Field::from_vec(vec![0.0, 2.0, 0.0, 0.0]),
            Field::from_vec(vec![0.0, 0.0, 2.0, 0.0]),
            Field::from_vec(vec![0.0, f64::NAN, 0.0, 0.0]),
        ]);

        let diagnostics = DiagnosticSeries::compute(&run, &grid(), true).unwrap();

        assert!(!diagnostics.is_stable());
        assert!(diagnostics.velocity.is_none());
        assert_eq!(diagnostics.amplitude, vec![2.0, 2.0, 0.0]);
        assert_eq!(diagnostics.peak_position[2], 0.0);
        assert!(diagnostics.mass[2].is_nan());
    }

    #[test]
    fn test_grid_mismatch() {
        let run = result(vec![Field::zeros(5)]);

        assert_eq!(
            DiagnosticSeries::compute(&run, &grid(), false),
            Err(KdvError::ShapeMismatch { expected: 4, actual: 5 })
        );
    }
}
