//! Runge-Kutta 4 (RK4) time integrator
//!
//! # Mathematical Background
//!
//! For the semi-discrete system `dy/dt = f(y)` produced by a spatial
//! operator, one RK4 step of size `dt` reads
//!
//! ```text
//! k₁ = dt·f(yₙ)
//! k₂ = dt·f(yₙ + k₁/2)
//! k₃ = dt·f(yₙ + k₂/2)
//! k₄ = dt·f(yₙ + k₃)
//!
//! yₙ₊₁ = yₙ + (k₁ + 2k₂ + 2k₃ + k₄)/6
//! ```
//!
//! # Characteristics
//!
//! - **Order**: fourth-order accurate in time (global error O(dt⁴))
//! - **Cost**: 4 operator evaluations per step
//! - **Stability**: explicit; for the dispersive term the step must satisfy
//!   roughly `dt < 1.1·h³`, otherwise the run blows up
//!
//! # Blow-up handling
//!
//! The integrator never stops early. All `T - 1` steps are taken, NaN and
//! infinities propagate freely, and the history is scanned afterwards with
//! [`scan_stability`](crate::solver::scan_stability).
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::models::{InitialCondition, KdvModel, SpatialOperator};
//! use kdv_rs::physics::Grid;
//! use kdv_rs::solver::{RK4Solver, Scenario, Solver};
//!
//! let grid = Grid::new(-10.0, 30.0, 0.25, 0.005, 0.5).unwrap();
//! let model = KdvModel::new(SpatialOperator::Full, &grid);
//! let initial = InitialCondition::soliton(0.5, 0.0).build(&grid).unwrap();
//! let scenario = Scenario::new(Box::new(model), grid, initial);
//!
//! let result = RK4Solver::new().solve(&scenario).unwrap();
//! assert_eq!(result.len(), 100);
//! ```

use log::{debug, trace, warn};

use crate::error::Result;
use crate::physics::{Field, PhysicalModel};
use crate::solver::{scan_stability, Scenario, SimulationResult, Solver, StateHistory};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// Stateless: the same solver can run any number of scenarios, and the
/// same scenario always yields a bit-identical history.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use kdv_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Advance `state` by one step of size `dt`
    ///
    /// Pure: neither the model nor `state` is modified. Non-finite input
    /// simply propagates to the output.
    pub fn step(&self, model: &dyn PhysicalModel, state: &Field, dt: f64) -> Field {
        let k1 = model.compute_physics(state) * dt;
        let k2 = model.compute_physics(&(state + &k1 * 0.5)) * dt;
        let k3 = model.compute_physics(&(state + &k2 * 0.5)) * dt;
        let k4 = model.compute_physics(&(state + &k3)) * dt;

        state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0
    }
}

impl Solver for RK4Solver {
    fn solve(&self, scenario: &Scenario) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        // ====== Step 2: Setup ======

        let grid = &scenario.grid;
        let dt = grid.dt();
        let time_levels = grid.steps();
        let model = scenario.model.as_ref();

        debug!(
            "{}: {} points, {} time levels, dt = {}, model = {}",
            self.name(),
            grid.points(),
            time_levels,
            dt,
            model.name()
        );

        let mut history = StateHistory::with_capacity(time_levels);
        history.push(scenario.initial.clone());

        // ====== Step 3: Time Integration ======

        // j = 0, ..., T-2 produces fields 1, ..., T-1
        let mut state = scenario.initial.clone();
        for step in 1..time_levels {
            state = self.step(model, &state, dt);
            history.push(state.clone());

            trace!("step {step}/{} done", time_levels - 1);
        }

        // ====== Step 4: Stability scan ======

        let stability = scan_stability(&history);
        if let Some(first) = stability.first_unstable_step {
            warn!(
                "Numerical instability: non-finite values from step {} (t = {}), {} of {} time levels affected",
                first,
                grid.time(first),
                stability.unstable_steps,
                time_levels
            );
        }

        // ====== Step 5: Build Result ======

        let mut result = SimulationResult::new(grid.time_points(), history, stability);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("model", model.name());
        result.add_metadata("time steps", &(time_levels - 1).to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &grid.t_max().to_string());
        result.add_metadata("function evaluations", &(4 * (time_levels - 1)).to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KdvError;
    use crate::models::{KdvModel, SpatialOperator};
    use crate::physics::Grid;
    use approx::assert_relative_eq;

    // ====== Mock Models for Testing ======

    /// dy/dt = -k·y, exact solution y₀·exp(-k·t)
    struct ExponentialDecay {
        points: usize,
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn points(&self) -> usize {
            self.points
        }

        fn compute_physics(&self, field: &Field) -> Field {
            field * -self.decay_rate
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// dy/dt = c, exact solution y₀ + c·t
    struct ConstantGrowth {
        points: usize,
        growth_rate: f64,
    }

    impl PhysicalModel for ConstantGrowth {
        fn points(&self) -> usize {
            self.points
        }

        fn compute_physics(&self, _field: &Field) -> Field {
            Field::from_element(self.points, self.growth_rate)
        }

        fn name(&self) -> &str {
            "Constant Growth"
        }
    }

    fn scenario(model: Box<dyn PhysicalModel>, dt: f64, t_max: f64, initial: f64) -> Scenario {
        let points = model.points();
        let grid = Grid::new(0.0, points as f64, 1.0, dt, t_max).unwrap();
        Scenario::new(model, grid, Field::from_element(points, initial))
    }

    #[test]
    fn test_scenario_helper_needs_two_points() {
        let scenario = scenario(Box::new(ExponentialDecay { points: 2, decay_rate: 1.0 }), 0.1, 1.0, 1.0);
        assert_eq!(scenario.grid.points(), 2);
        assert!(Grid::new(0.0, 1.0, 1.0, 0.1, 1.0).is_err());
    }

    // ====== Solver creation tests ======

    #[test]
    fn test_rk4_solver_creation() {
        assert_eq!(RK4Solver::new().name(), "Runge Kutta (RK4)");
        assert_eq!(RK4Solver::default().name(), "Runge Kutta (RK4)");
    }

    // ====== Driver contract ======

    #[test]
    fn test_rk4_history_has_one_field_per_time_level() {
        let scenario = scenario(
            Box::new(ConstantGrowth { points: 3, growth_rate: 1.0 }),
            0.1,
            1.0,
            0.0,
        );

        let result = RK4Solver::new().solve(&scenario).unwrap();

        assert_eq!(scenario.grid.steps(), 10);
        assert_eq!(result.len(), 10);
        assert_eq!(result.time_points.len(), 10);
        assert_relative_eq!(result.time_points[9], 0.9, epsilon = 1e-12);
        assert_eq!(result.history[0], scenario.initial);
        assert_eq!(result.metadata.get("time steps").map(String::as_str), Some("9"));
        assert_eq!(result.metadata.get("function evaluations").map(String::as_str), Some("36"));
    }

    #[test]
    fn test_rk4_single_time_level_is_initial_only() {
        let scenario = scenario(
            Box::new(ConstantGrowth { points: 3, growth_rate: 1.0 }),
            0.5,
            0.5,
            2.0,
        );

        let result = RK4Solver::new().solve(&scenario).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.history[0], Field::from_element(3, 2.0));
        assert!(result.stability.is_stable());
    }

    #[test]
    fn test_rk4_rejects_mismatched_scenario() {
        let grid = Grid::new(0.0, 4.0, 1.0, 0.1, 1.0).unwrap();
        let model = ConstantGrowth { points: 4, growth_rate: 1.0 };
        let scenario = Scenario::new(Box::new(model), grid, Field::zeros(3));

        let result = RK4Solver::new().solve(&scenario);

        assert!(matches!(
            result,
            Err(KdvError::ShapeMismatch { expected: 4, actual: 3 })
        ));
    }

    // ====== Numerical accuracy tests ======

    #[test]
    fn test_rk4_constant_growth_is_exact() {
        let growth_rate = 2.0;
        let scenario = scenario(
            Box::new(ConstantGrowth { points: 5, growth_rate }),
            0.1,
            10.0,
            0.0,
        );

        let result = RK4Solver::new().solve(&scenario).unwrap();
        let t_final = *result.time_points.last().unwrap();

        for value in result.final_state().unwrap().iter() {
            assert_relative_eq!(*value, growth_rate * t_final, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rk4_exponential_decay() {
        let decay_rate = 0.1;
        let scenario = scenario(
            Box::new(ExponentialDecay { points: 5, decay_rate }),
            0.1,
            10.0,
            1.0,
        );

        let result = RK4Solver::new().solve(&scenario).unwrap();
        let t_final = *result.time_points.last().unwrap();
        let expected = (-decay_rate * t_final).exp();

        assert_relative_eq!(result.final_state().unwrap()[0], expected, max_relative = 1e-8);
    }

    #[test]
    fn test_rk4_fourth_order_convergence() {
        let decay_rate = 1.0;
        let error = |dt: f64| {
            let scenario = scenario(
                Box::new(ExponentialDecay { points: 2, decay_rate }),
                dt,
                1.0 + dt,
                1.0,
            );
            let result = RK4Solver::new().solve(&scenario).unwrap();
            let t_final = *result.time_points.last().unwrap();
            (result.final_state().unwrap()[0] - (-decay_rate * t_final).exp()).abs()
        };

        let coarse = error(0.1);
        let fine = error(0.05);

        // Halving dt divides the error by about 2⁴
        let ratio = coarse / fine;
        assert!(ratio > 12.0 && ratio < 20.0, "convergence ratio {ratio}");
    }

    #[test]
    fn test_rk4_step_matches_formula() {
        let model = ExponentialDecay { points: 1, decay_rate: 1.0 };
        let state = Field::from_element(1, 1.0);
        let dt = 0.1;

        let next = RK4Solver::new().step(&model, &state, dt);

        // Taylor polynomial of exp(-dt) to fourth order
        let expected = 1.0 - dt + dt * dt / 2.0 - dt.powi(3) / 6.0 + dt.powi(4) / 24.0;
        assert_relative_eq!(next[0], expected, epsilon = 1e-15);
        assert_eq!(state[0], 1.0);
    }

    // ====== Stability ======

    #[test]
    fn test_rk4_blow_up_is_reported_not_aborted() {
        // Growth factor per step is about 4e10, overflow within a few dozen steps
        let scenario = scenario(
            Box::new(ExponentialDecay { points: 2, decay_rate: -1000.0 }),
            1.0,
            60.0,
            1.0,
        );

        let result = RK4Solver::new().solve(&scenario).unwrap();

        assert_eq!(result.len(), 60);
        let first = result
            .stability
            .first_unstable_step
            .expect("run should be flagged unstable");
        assert!(first > 0);
        assert!(result.history[first - 1].iter().all(|v| v.is_finite()));
        assert!(result.history[first].iter().any(|v| !v.is_finite()));
        assert!(result.stability.unstable_steps >= 1);
    }

    #[test]
    fn test_rk4_is_deterministic_on_kdv() {
        let grid = Grid::new(-10.0, 30.0, 0.5, 0.01, 0.5).unwrap();
        let initial = crate::models::InitialCondition::soliton(0.5, 0.0)
            .build(&grid)
            .unwrap();
        let make = || {
            Scenario::new(
                Box::new(KdvModel::new(SpatialOperator::Full, &grid)),
                grid.clone(),
                initial.clone(),
            )
        };

        let first = RK4Solver::new().solve(&make()).unwrap();
        let second = RK4Solver::new().solve(&make()).unwrap();

        assert_eq!(first.history, second.history);
        assert!(first.stability.is_stable());
    }
}
