//! Physical model trait and field type
//!
//! - `Field`: one snapshot of the wave on the periodic grid
//! - `PhysicalModel`: evaluates the right-hand side `f(u)` of `du/dt = f(u)`

use nalgebra::DVector;

/// One simulation state: `N` real samples on the periodic grid
///
/// Indices are read modulo `N` whenever a stencil reaches past an edge.
pub type Field = DVector<f64>;

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
///
/// Computes the spatial part of the governing equation at a given field.
/// Does NOT advance it in time (that is the solver's job): the model
/// provides the "physics", the solver the "numerics".
///
/// # Contract
///
/// `compute_physics` must be a pure function of its input: the same field
/// always yields bit-identical output. The driver relies on this for
/// reproducible runs.
pub trait PhysicalModel: Send + Sync {
    /// Number of spatial points
    ///
    /// Used by the solver to check the initial field before a run.
    fn points(&self) -> usize;

    /// Right-hand side `f(u)` evaluated on a full field
    ///
    /// # Arguments
    /// * `field` - Current (possibly RK-perturbed) field, length `points()`
    ///
    /// # Returns
    /// A field of the same length holding the time derivative at each sample
    fn compute_physics(&self, field: &Field) -> Field;

    /// Name of the model (used for display and logging)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
