//! Physical models and the periodic grid
//!
//! A physical model contains the equations of a system; here the spatial
//! part of the Korteweg–de Vries family on a ring.
//!
//! # Core Concepts
//!
//! - **Grid**: periodic spatial sampling plus uniform time sampling
//! - **Field**: one snapshot of the wave, `N` samples on the grid
//! - **Physical Model**: computes `f(u)` in `du/dt = f(u)` for a field
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to advance them (numerics)
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::physics::{Field, Grid, PhysicalModel};
//! use kdv_rs::models::{KdvModel, SpatialOperator};
//!
//! let grid = Grid::new(0.0, 10.0, 1.0, 0.01, 1.0).unwrap();
//! let model = KdvModel::new(SpatialOperator::Diffusive, &grid);
//!
//! let field = Field::zeros(grid.points());
//! let rhs = model.compute_physics(&field);
//! assert_eq!(rhs.len(), 10);
//! ```

pub mod grid;
pub mod traits;

pub use grid::Grid;
pub use traits::{Field, PhysicalModel};
