//! Initial-condition profiles
//!
//! Defines the field `u(x, t=0)` sampled on the grid.
//!
//! # Profiles
//!
//! - **Solitons**: superposition of exact KdV solitons `12α²·sech²(α(x - x0))`
//! - **Cosine**: a single positive cosine lobe, zero elsewhere
//! - **Gaussian**: bell-shaped pulse
//! - **Custom**: explicit samples
//!
//! # Example
//!
//! ```rust
//! use kdv_rs::models::InitialCondition;
//! use kdv_rs::physics::Grid;
//!
//! let grid = Grid::new(-10.0, 50.0, 0.5, 0.01, 2.5).unwrap();
//! let initial = InitialCondition::soliton(0.5, 0.0);
//!
//! let field = initial.build(&grid).unwrap();
//! // Peak of 12·α² at x0 = 0, which is sample 20
//! assert!((field[20] - 3.0).abs() < 1e-12);
//! ```

use crate::error::{KdvError, Result};
use crate::physics::{Field, Grid};

/// One KdV soliton `12α²·sech²(α(x - x0))`
///
/// For `u_t + u·u_x + u_xxx = 0` this profile translates without change of
/// shape at speed `c = 4α²`; its amplitude is `3c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soliton {
    /// Shape parameter α (inverse width)
    pub alpha: f64,
    /// Initial peak position
    pub x0: f64,
}

impl Soliton {
    pub fn new(alpha: f64, x0: f64) -> Self {
        Self { alpha, x0 }
    }

    /// Peak value `12α²`
    pub fn amplitude(&self) -> f64 {
        12.0 * self.alpha * self.alpha
    }

    /// Analytic propagation speed `4α²`
    pub fn speed(&self) -> f64 {
        4.0 * self.alpha * self.alpha
    }

    /// Profile value at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        let sech = 1.0 / (self.alpha * (x - self.x0)).cosh();
        self.amplitude() * sech * sech
    }
}

/// Initial field generator
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    /// Sum of solitons
    Solitons(Vec<Soliton>),

    /// `amplitude·cos((x - x0)·π/width)` on `[x0 - width/2, x0 + width/2]`, 0 outside
    ///
    /// `width` is the distance between the two roots of the lobe.
    Cosine { width: f64, x0: f64, amplitude: f64 },

    /// `height·exp(-(x - x0)²/(2·sd²))`
    Gaussian { sd: f64, x0: f64, height: f64 },

    /// Explicit samples, one per grid point
    Custom(Field),
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self::soliton(4.2, 0.0)
    }
}

impl InitialCondition {
    /// Single soliton
    pub fn soliton(alpha: f64, x0: f64) -> Self {
        Self::Solitons(vec![Soliton::new(alpha, x0)])
    }

    pub fn cosine(width: f64, x0: f64, amplitude: f64) -> Self {
        Self::Cosine { width, x0, amplitude }
    }

    pub fn gaussian(sd: f64, x0: f64, height: f64) -> Self {
        Self::Gaussian { sd, x0, height }
    }

    /// Check profile parameters independently of any grid
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Solitons(solitons) => {
                if solitons.is_empty() {
                    return Err(KdvError::invalid("solitons", "at least one soliton is required"));
                }
                for soliton in solitons {
                    if !soliton.alpha.is_finite() || soliton.alpha == 0.0 {
                        return Err(KdvError::invalid(
                            "alpha",
                            format!("must be finite and non-zero, got {}", soliton.alpha),
                        ));
                    }
                    if !soliton.x0.is_finite() {
                        return Err(KdvError::invalid("x0", "must be finite"));
                    }
                }
                Ok(())
            }
            Self::Cosine { width, x0, amplitude } => {
                if !(width.is_finite() && *width > 0.0) {
                    return Err(KdvError::invalid("width", format!("must be positive, got {width}")));
                }
                if !(x0.is_finite() && amplitude.is_finite()) {
                    return Err(KdvError::invalid("cosine", "x0 and amplitude must be finite"));
                }
                Ok(())
            }
            Self::Gaussian { sd, x0, height } => {
                if !(sd.is_finite() && *sd > 0.0) {
                    return Err(KdvError::invalid("sd", format!("must be positive, got {sd}")));
                }
                if !(x0.is_finite() && height.is_finite()) {
                    return Err(KdvError::invalid("gaussian", "x0 and height must be finite"));
                }
                Ok(())
            }
            Self::Custom(_) => Ok(()),
        }
    }

    /// Sample the profile on `grid`
    ///
    /// # Errors
    ///
    /// - [`KdvError::InvalidParameter`] for malformed profile parameters
    /// - [`KdvError::ShapeMismatch`] when a custom field has the wrong length
    pub fn build(&self, grid: &Grid) -> Result<Field> {
        self.validate()?;

        let x = grid.coordinates();
        let field = match self {
            Self::Solitons(solitons) => Field::from_fn(x.len(), |i, _| {
                solitons.iter().map(|s| s.evaluate(x[i])).sum()
            }),
            Self::Cosine { width, x0, amplitude } => Field::from_fn(x.len(), |i, _| {
                let offset = x[i] - x0;
                if offset.abs() > width / 2.0 {
                    0.0
                } else {
                    amplitude * (offset * std::f64::consts::PI / width).cos()
                }
            }),
            Self::Gaussian { sd, x0, height } => Field::from_fn(x.len(), |i, _| {
                let offset = x[i] - x0;
                height * (-(offset * offset) / (2.0 * sd * sd)).exp()
            }),
            Self::Custom(field) => {
                if field.len() != grid.points() {
                    return Err(KdvError::ShapeMismatch {
                        expected: grid.points(),
                        actual: field.len(),
                    });
                }
                field.clone()
            }
        };

        Ok(field)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
