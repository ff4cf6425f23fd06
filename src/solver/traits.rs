//! Numerical solver traits and types
//!
//! # Design
//!
//! - `Solver` trait: advances a [`Scenario`] over its time grid
//! - `SimulationResult`: the full field history plus what the run learned
//!   about itself (stability, metadata)
//! - `StabilityReport`: outcome of the post-run non-finite scan
//!
//! A run never aborts on blow-up. The solver completes all steps and the
//! stability report is derived afterwards, so callers always get `T` fields.

use std::collections::HashMap;

use crate::error::Result;
use crate::physics::Field;
use crate::solver::{Scenario, StateHistory};

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Stable interface for time integrators
///
/// # Example
///
/// ```rust
/// use kdv_rs::models::{KdvModel, SpatialOperator, InitialCondition};
/// use kdv_rs::physics::Grid;
/// use kdv_rs::solver::{RK4Solver, Scenario, Solver};
///
/// let grid = Grid::new(-10.0, 30.0, 0.5, 0.01, 0.1).unwrap();
/// let model = KdvModel::new(SpatialOperator::Full, &grid);
/// let initial = InitialCondition::soliton(0.5, 0.0).build(&grid).unwrap();
/// let scenario = Scenario::new(Box::new(model), grid, initial);
///
/// let result = RK4Solver::new().solve(&scenario).unwrap();
/// assert_eq!(result.len(), scenario.grid.steps());
/// assert!(result.stability.is_stable());
/// ```
pub trait Solver {
    /// Run the scenario from `t = 0` and return every time level
    ///
    /// # Errors
    ///
    /// Only inconsistent scenarios (model, grid and initial field of
    /// different sizes) are errors. Numerical blow-up is reported in
    /// [`SimulationResult::stability`].
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult>;

    /// Human readable method name
    fn name(&self) -> &str;
}

// =================================================================================================
// Stability Report
// =================================================================================================

/// Outcome of scanning a finished run for non-finite values
///
/// A time level is unstable when any of its samples is NaN or infinite.
/// Every level is inspected; `first_unstable_step` is the smallest unstable
/// index and `unstable_steps` their total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StabilityReport {
    /// Index of the first time level containing a non-finite sample
    pub first_unstable_step: Option<usize>,

    /// Number of time levels containing a non-finite sample
    pub unstable_steps: usize,
}

impl StabilityReport {
    /// Report of a run without any non-finite sample
    pub fn stable() -> Self {
        Self::default()
    }

    pub fn is_stable(&self) -> bool {
        self.first_unstable_step.is_none()
    }

    /// Whether diagnostics at `step` fall in the unstable tail of the run
    ///
    /// True for every step at or after the first unstable one, even if a
    /// later field happens to be finite again.
    pub fn is_unstable_at(&self, step: usize) -> bool {
        matches!(self.first_unstable_step, Some(first) if step >= first)
    }
}

// =================================================================================================
// Simulation Result
// =================================================================================================

/// Output of [`Solver::solve`]
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// `t_j = j·dt`, one per stored field
    pub time_points: Vec<f64>,

    /// Field at every time level, initial condition first
    pub history: StateHistory,

    /// Non-finite scan of `history`
    pub stability: StabilityReport,

    /// Free-form run description (solver, dt, evaluations, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(time_points: Vec<f64>, history: StateHistory, stability: StabilityReport) -> Self {
        debug_assert_eq!(time_points.len(), history.len());
        Self {
            time_points,
            history,
            stability,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry, replacing any previous value for `key`
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of time levels
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn final_state(&self) -> Option<&Field> {
        self.history.final_state()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_report() {
        let report = StabilityReport::stable();

        assert!(report.is_stable());
        assert!(!report.is_unstable_at(0));
        assert!(!report.is_unstable_at(usize::MAX));
    }

    #[test]
    fn test_unstable_tail() {
        let report = StabilityReport {
            first_unstable_step: Some(5),
            unstable_steps: 2,
        };

        assert!(!report.is_stable());
        assert!(!report.is_unstable_at(4));
        assert!(report.is_unstable_at(5));
        assert!(report.is_unstable_at(100));
    }

    #[test]
    fn test_result_metadata_and_accessors() {
        let history = StateHistory::from_fields(vec![Field::zeros(2), Field::from_element(2, 1.0)])
            .unwrap();
        let mut result = SimulationResult::new(vec![0.0, 0.1], history, StabilityReport::stable());

        result.add_metadata("solver", "test");
        result.add_metadata("solver", "replaced");

        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.final_state().unwrap()[1], 1.0);
        assert_eq!(result.metadata.get("solver").map(String::as_str), Some("replaced"));
    }
}
