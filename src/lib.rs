//! kdv-rs: Korteweg–de Vries simulations on a periodic grid
//!
//! Solves `u_t + u·u_x + u_xxx = 0` (and two simplified variants) with
//! centred finite differences in space and classical Runge–Kutta in time,
//! then derives mass, peak and velocity diagnostics from the run.
//!
//! # Architecture
//!
//! kdv-rs keeps the two usual layers apart:
//!
//! 1. **Physics and Numerics**
//!    - Physical models define the right-hand side (what to solve)
//!    - Numerical solvers advance it in time (how to solve)
//!
//! 2. **Pipeline**
//!    - [`config::SimulationConfig`] describes a run
//!    - [`simulation::Simulation`] builds the scenario, integrates, and
//!      computes [`diagnostics`]
//!    - [`output`] writes CSV files and, with the `plotting` feature, plots
//!
//! # Quick Start
//!
//! ```rust
//! use kdv_rs::prelude::*;
//!
//! # fn main() -> Result<(), KdvError> {
//! // 1. Describe the run
//! let config = SimulationConfig::default()
//!     .with_domain(-10.0, 30.0, 0.5)
//!     .with_time(0.01, 0.5)
//!     .with_operator(SpatialOperator::Full)
//!     .with_initial(InitialCondition::soliton(0.5, 0.0));
//!
//! // 2. Run it
//! let output = Simulation::new(config)?.run()?;
//!
//! // 3. Inspect the results
//! assert!(output.is_stable());
//! assert_eq!(output.result.history.len(), 50);
//! println!("final amplitude: {}", output.diagnostics.amplitude[49]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid and model trait
//! - [`models`]: KdV operators and initial conditions
//! - [`solver`]: RK4 integration and stability scan
//! - [`diagnostics`]: mass, peak tracking, velocity estimation
//! - [`output`]: CSV export and plots
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: run summaries at `info`,
//! per-run details at `debug`, numerical blow-up at `warn`. Install any
//! logger (`env_logger`, ...) in the binary to see them.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod output;
pub mod physics;
pub mod simulation;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use kdv_rs::prelude::*;
    //! ```
    pub use crate::config::SimulationConfig;
    pub use crate::diagnostics::{DiagnosticSeries, VelocitySeries};
    pub use crate::error::KdvError;
    pub use crate::models::{InitialCondition, KdvModel, Soliton, SpatialOperator};
    pub use crate::physics::{Field, Grid, PhysicalModel};
    pub use crate::simulation::{Simulation, SimulationOutput};
    pub use crate::solver::{
        RK4Solver, Scenario, SimulationResult, Solver, StabilityReport, StateHistory,
    };
}
