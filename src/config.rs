//! Run configuration
//!
//! [`SimulationConfig`] gathers every parameter a run needs. The defaults
//! describe a fast soliton (`α = 4.2`) on `[-10, 50)` with the damped
//! operator; most studies only override a couple of fields.
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::config::SimulationConfig;
//! use kdv_rs::models::{InitialCondition, SpatialOperator};
//!
//! let config = SimulationConfig::default()
//!     .with_domain(-10.0, 30.0, 0.25)
//!     .with_time(0.005, 10.0)
//!     .with_operator(SpatialOperator::Full)
//!     .with_initial(InitialCondition::soliton(0.5, 0.0))
//!     .with_velocity(true);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.grid().unwrap().points(), 160);
//! ```

use crate::error::Result;
use crate::models::{InitialCondition, SpatialOperator};
use crate::physics::Grid;

/// Parameters of one simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Left end of the ring (sampled)
    pub x_min: f64,
    /// Right end of the ring (identified with `x_min`, not sampled)
    pub x_max: f64,
    /// Spatial step
    pub h: f64,
    /// Time step
    pub dt: f64,
    /// Time span; `floor(t_max/dt)` time levels are stored
    pub t_max: f64,
    /// Spatial operator variant
    pub operator: SpatialOperator,
    /// Field at `t = 0`
    pub initial: InitialCondition,
    /// Whether to run the peak velocity estimator
    pub compute_velocity: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 50.0,
            h: 0.5,
            dt: 0.01,
            t_max: 2.5,
            operator: SpatialOperator::Diffusive,
            initial: InitialCondition::default(),
            compute_velocity: false,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial domain `[x_min, x_max)` and step `h`
    pub fn with_domain(mut self, x_min: f64, x_max: f64, h: f64) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self.h = h;
        self
    }

    /// Set the time step and time span
    pub fn with_time(mut self, dt: f64, t_max: f64) -> Self {
        self.dt = dt;
        self.t_max = t_max;
        self
    }

    pub fn with_operator(mut self, operator: SpatialOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_initial(mut self, initial: InitialCondition) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_velocity(mut self, compute_velocity: bool) -> Self {
        self.compute_velocity = compute_velocity;
        self
    }

    /// Build the grid described by this configuration
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.x_min, self.x_max, self.h, self.dt, self.t_max)
    }

    /// Check everything that can be checked before a run
    ///
    /// # Errors
    ///
    /// - [`KdvError::InvalidParameter`](crate::error::KdvError::InvalidParameter)
    ///   for bad grid, time or profile parameters
    /// - [`KdvError::ShapeMismatch`](crate::error::KdvError::ShapeMismatch)
    ///   for a custom initial field of the wrong length
    pub fn validate(&self) -> Result<()> {
        let grid = self.grid()?;
        self.initial.build(&grid)?;
        Ok(())
    }
}
