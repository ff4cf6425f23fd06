//! Periodic finite-difference operators for the KdV family
//!
//! Discretises the spatial part of
//!
//! ```text
//! u_t + u·u_x + u_xxx = 0
//! ```
//!
//! with centred differences on a ring of `N` points. Three variants are
//! available:
//!
//! | Variant | Right-hand side `k[i]` |
//! |---|---|
//! | `Full` | `-(y[i+1]² - y[i-1]²)/(4h) - (y[i+2] - 2y[i+1] + 2y[i-1] - y[i-2])/(2h³)` |
//! | `Inviscid` | `-(y[i+1]² - y[i-1]²)/(4h)` |
//! | `Diffusive` | `-(y[i+1]² - y[i-1]²)/(4h) + (y[i+1] - 2y[i] + y[i-1])/(2h²)` |
//!
//! Every neighbour index is taken modulo `N`. There is no boundary code
//! path: indices `0`, `1`, `N-2` and `N-1` go through exactly the same
//! stencil as interior points.
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::models::{KdvModel, SpatialOperator};
//! use kdv_rs::physics::{Field, Grid, PhysicalModel};
//!
//! let grid = Grid::new(-10.0, 30.0, 0.25, 0.005, 1.0).unwrap();
//! let model = KdvModel::new("full".parse::<SpatialOperator>().unwrap(), &grid);
//!
//! let rhs = model.compute_physics(&Field::from_element(grid.points(), 1.0));
//! // A constant field is a steady state of every variant
//! assert!(rhs.iter().all(|v| v.abs() < 1e-12));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::KdvError;
use crate::physics::{Field, Grid, PhysicalModel};

// =================================================================================================
// Operator selector
// =================================================================================================

/// Spatial operator variant
///
/// Selected once from configuration; the stencil dispatch is a `match` on
/// this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpatialOperator {
    /// Nonlinear advection plus third-derivative dispersion (soliton dynamics)
    Full,

    /// Nonlinear advection only; steepens into shocks
    Inviscid,

    /// Nonlinear advection plus second-derivative damping
    #[default]
    Diffusive,
}

impl SpatialOperator {
    /// All variants, in selector order
    pub const ALL: [SpatialOperator; 3] = [Self::Full, Self::Inviscid, Self::Diffusive];

    /// Configuration selector for this variant
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Inviscid => "inviscid",
            Self::Diffusive => "diffusive",
        }
    }
}

impl fmt::Display for SpatialOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for SpatialOperator {
    type Err = KdvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "inviscid" => Ok(Self::Inviscid),
            "diffusive" => Ok(Self::Diffusive),
            other => Err(KdvError::invalid(
                "operator",
                format!("unknown variant `{other}`, expected full | inviscid | diffusive"),
            )),
        }
    }
}

// =================================================================================================
// Model
// =================================================================================================

/// KdV-family right-hand side on a periodic grid
///
/// Stencil coefficients are computed once from `h` at construction.
#[derive(Debug, Clone)]
pub struct KdvModel {
    operator: SpatialOperator,
    points: usize,
    h: f64,
    /// 1/(4h)
    advection: f64,
    /// 1/(2h³)
    dispersion: f64,
    /// 1/(2h²)
    diffusion: f64,
}

impl KdvModel {
    /// Create the model for a variant on a grid
    pub fn new(operator: SpatialOperator, grid: &Grid) -> Self {
        let h = grid.h();
        Self {
            operator,
            points: grid.points(),
            h,
            advection: 0.25 / h,
            dispersion: 0.5 / (h * h * h),
            diffusion: 0.5 / (h * h),
        }
    }

    pub fn operator(&self) -> SpatialOperator {
        self.operator
    }

    /// Spatial step the coefficients were built for
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Evaluate the stencil at sample `i`
    ///
    /// `y.len()` must be `self.points`; neighbours wrap modulo `N`.
    #[inline]
    fn stencil(&self, y: &[f64], i: usize) -> f64 {
        let n = y.len();
        let ip1 = (i + 1) % n;
        let im1 = (i + n - 1) % n;

        let advection = -self.advection * (y[ip1] * y[ip1] - y[im1] * y[im1]);

        match self.operator {
            SpatialOperator::Full => {
                let ip2 = (i + 2) % n;
                let im2 = (i + 2 * n - 2) % n;
                advection
                    - self.dispersion * (y[ip2] - 2.0 * y[ip1] + 2.0 * y[im1] - y[im2])
            }
            SpatialOperator::Inviscid => advection,
            SpatialOperator::Diffusive => {
                advection + self.diffusion * (y[ip1] - 2.0 * y[i] + y[im1])
            }
        }
    }

    fn evaluate_sequential(&self, y: &[f64]) -> Field {
        Field::from_fn(self.points, |i, _| self.stencil(y, i))
    }

    /// Each sample only reads the input field, so this produces the same
    /// bits as [`Self::evaluate_sequential`].
    #[cfg(feature = "parallel")]
    fn evaluate_parallel(&self, y: &[f64]) -> Field {
        use rayon::prelude::*;

        let values: Vec<f64> = (0..self.points)
            .into_par_iter()
            .map(|i| self.stencil(y, i))
            .collect();
        Field::from_vec(values)
    }
}

impl PhysicalModel for KdvModel {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, field: &Field) -> Field {
        assert_eq!(
            field.len(),
            self.points,
            "Field size {} vs points discretization {}",
            field.len(),
            self.points
        );

        let y = field.as_slice();

        #[cfg(feature = "parallel")]
        if self.points > crate::solver::parallel_threshold() {
            return self.evaluate_parallel(y);
        }

        self.evaluate_sequential(y)
    }

    fn name(&self) -> &str {
        match self.operator {
            SpatialOperator::Full => "KdV (advection + dispersion)",
            SpatialOperator::Inviscid => "Inviscid Burgers (advection only)",
            SpatialOperator::Diffusive => "Damped KdV (advection + diffusion)",
        }
    }

    fn description(&self) -> Option<&str> {
        Some(
            "Centred finite differences on a periodic grid. \
             Neighbour indices wrap modulo the number of points.",
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
