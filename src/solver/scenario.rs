//! Simulation scenario definition
//!
//! A scenario combines a physical model with the grid it is discretised on
//! and the field at `t = 0`.

use crate::error::{KdvError, Result};
use crate::physics::{Field, Grid, PhysicalModel};

/// Simulation scenario
///
/// This is the "WHAT to solve"; the [`Solver`](crate::solver::Solver) is the
/// "HOW". The same scenario can be handed to any solver.
///
/// # Example
///
/// ```rust
/// use kdv_rs::models::{KdvModel, SpatialOperator};
/// use kdv_rs::physics::{Field, Grid};
/// use kdv_rs::solver::Scenario;
///
/// let grid = Grid::new(0.0, 10.0, 1.0, 0.1, 1.0).unwrap();
/// let model = KdvModel::new(SpatialOperator::Inviscid, &grid);
/// let scenario = Scenario::new(Box::new(model), grid, Field::zeros(10));
///
/// assert!(scenario.validate().is_ok());
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Space and time sampling
    pub grid: Grid,

    /// Field at `t = 0`
    pub initial: Field,
}

impl Scenario {
    pub fn new(model: Box<dyn PhysicalModel>, grid: Grid, initial: Field) -> Self {
        Self { model, grid, initial }
    }

    /// Check that model, grid and initial field agree on the number of points
    pub fn validate(&self) -> Result<()> {
        let expected = self.grid.points();

        if self.model.points() != expected {
            return Err(KdvError::ShapeMismatch {
                expected,
                actual: self.model.points(),
            });
        }
        if self.initial.len() != expected {
            return Err(KdvError::ShapeMismatch {
                expected,
                actual: self.initial.len(),
            });
        }

        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("grid", &self.grid)
            .field("initial points", &self.initial.len())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
