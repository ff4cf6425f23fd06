//! Time integration methods
//!
//! Concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`RK4Solver`]**: classical fourth-order Runge-Kutta
//!   - Order: O(dt⁴)
//!   - Cost: 4 operator evaluations per step
//!   - Explicit: `dt` is bounded by the stiffest term of the operator
//!
//! Each solver is stateless and can be reused for any number of scenarios.
//! Large grids benefit from the `parallel` feature through the model's
//! operator evaluation, see [`set_parallel_threshold`](crate::solver::set_parallel_threshold).

mod rk4;

pub use rk4::RK4Solver;
