//! Physical models for the KdV family on a ring
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` four times per RK4 step; models are
//! responsible for the spatial operator, the solver for the time integration.
//!
//! # Available Models
//!
//! ## [`KdvModel`]: periodic finite differences
//!
//! One model type, three operator variants chosen with [`SpatialOperator`]:
//! `Full` (solitons), `Inviscid` (shock formation) and `Diffusive` (damped,
//! numerically forgiving).
//!
//! # Initial Conditions
//!
//! [`InitialCondition`] samples the starting field on a grid: exact KdV
//! solitons, a truncated cosine lobe, a Gaussian, or explicit samples.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod initial;
pub mod kdv;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use initial::{InitialCondition, Soliton};
pub use kdv::{KdvModel, SpatialOperator};
