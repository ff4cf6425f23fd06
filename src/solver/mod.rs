//! Numerical solvers
//!
//! A numerical solver applies a time-stepping method to the equations
//! provided by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (spatial operator)
//!    - Grid (space and time sampling)
//!    - Initial field
//!
//! 2. **Solver** (`Solver` trait) - HOW to solve
//!    - Applies the time integration scheme
//!    - Returns every time level
//!    - Independent of the physics
//!
//! 3. **Result** (`SimulationResult`) - the solution
//!    - `StateHistory` of `T` fields
//!    - `StabilityReport` from the post-run scan
//!
//! # Workflow
//!
//! ```text
//! ┌─────────────────┐   ┌──────┐   ┌───────────────┐
//! │ Physical Model  │   │ Grid │   │ Initial field │
//! └────────┬────────┘   └──┬───┘   └───────┬───────┘
//!          └───────────────┼───────────────┘
//!                 ┌────────▼────────┐
//!                 │    Scenario     │ ← WHAT to solve
//!                 └────────┬────────┘
//!                 ┌────────▼────────┐
//!                 │   RK4Solver     │ ← The method
//!                 └────────┬────────┘
//!                 ┌────────▼──────────────┐
//!                 │ SimulationResult      │ ← history + stability
//!                 └───────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use kdv_rs::models::{InitialCondition, KdvModel, SpatialOperator};
//! use kdv_rs::physics::Grid;
//! use kdv_rs::solver::{RK4Solver, Scenario, Solver};
//!
//! let grid = Grid::new(-10.0, 50.0, 0.5, 0.01, 0.2).unwrap();
//! let model = KdvModel::new(SpatialOperator::Diffusive, &grid);
//! let initial = InitialCondition::soliton(0.5, 0.0).build(&grid).unwrap();
//!
//! let scenario = Scenario::new(Box::new(model), grid, initial);
//! let result = RK4Solver::new().solve(&scenario).unwrap();
//!
//! println!("{} time levels, stable = {}", result.len(), result.stability.is_stable());
//! ```
//!
//! # Time Step Selection
//!
//! RK4 is explicit. With the dispersive term the step must stay below
//! about `1.1·h³`; the diffusive term alone needs `dt ≲ 1.4·h²`. Runs that
//! violate this still complete, but their `StabilityReport` flags the first
//! non-finite time level.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod history;
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Grids larger than the threshold have their stencil evaluated with Rayon.
// Stored in an atomic so benchmarks and tests can change it at runtime;
// both paths yield bit-identical fields.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid points above which operator evaluation switches
/// to parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Models evaluate their stencil sequentially when the grid has at most this
/// many points, and with Rayon above it, but only when the crate is compiled
/// with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use kdv_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use kdv_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that touch the global threshold.
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that sets the threshold and restores the previous value on
/// drop.
///
/// Holds a process-wide lock for its lifetime, so two tests using guards
/// never observe each other's value.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        // A panicking test poisons the lock; the value is restored by Drop anyway.
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }

    /// Put the saved value back; the lock stays held until drop.
    pub(crate) fn restore(&self) {
        // Bypass the public setter so restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use history::StateHistory;
pub use methods::RK4Solver;
pub use scenario::Scenario;
pub use traits::{SimulationResult, Solver, StabilityReport};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::Field;

/// Whether every sample of `field` is finite (neither NaN nor ±∞)
pub fn is_finite_field(field: &Field) -> bool {
    field.iter().all(|v| v.is_finite())
}

/// Scan a finished run for non-finite values
///
/// Every time level is inspected. NaN typically comes from `∞ - ∞` once
/// the advection term has overflowed, infinity from the overflow itself;
/// both count.
///
/// # Example
///
/// ```rust
/// use kdv_rs::physics::Field;
/// use kdv_rs::solver::{scan_stability, StateHistory};
///
/// let history = StateHistory::from_fields(vec![
///     Field::from_vec(vec![1.0, 2.0]),
///     Field::from_vec(vec![f64::INFINITY, 2.0]),
///     Field::from_vec(vec![f64::NAN, f64::NAN]),
/// ]).unwrap();
///
/// let report = scan_stability(&history);
/// assert_eq!(report.first_unstable_step, Some(1));
/// assert_eq!(report.unstable_steps, 2);
/// ```
pub fn scan_stability(history: &StateHistory) -> StabilityReport {
    let mut report = StabilityReport::stable();

    for (step, field) in history.iter().enumerate() {
        if !is_finite_field(field) {
            report.unstable_steps += 1;
            if report.first_unstable_step.is_none() {
                report.first_unstable_step = Some(step);
            }
        }
    }

    report
}

// =================================================================================================
// Tests
// =================================================================================================
