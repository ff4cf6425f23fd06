//! Error types for the simulation core
//!
//! Only failures that prevent a run from starting are errors. Numerical
//! blow-up during a run is reported through
//! [`StabilityReport`](crate::solver::StabilityReport) instead, so the
//! history of an unstable run can still be inspected.

use thiserror::Error;

/// Errors raised by grid construction, configuration and scenario setup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdvError {
    /// A grid, time or profile parameter is malformed
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human readable explanation
        reason: String,
    },

    /// A field does not have the number of points the grid expects
    #[error("field has {actual} points but the grid has {expected}")]
    ShapeMismatch {
        /// Number of points expected by the grid
        expected: usize,
        /// Number of points actually provided
        actual: usize,
    },
}

impl KdvError {
    /// Shorthand for [`KdvError::InvalidParameter`]
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, KdvError>;
