//! Periodic space-time grid
//!
//! The spatial axis is a ring: sample `N` is sample `0` again. The grid also
//! carries the temporal sampling because every stage of the pipeline (the
//! integrator, the driver and the diagnostics) needs both.

use crate::error::{KdvError, Result};

/// Relative slack applied before flooring a span/step ratio.
///
/// `(x_max - x_min) / h` may land a few ulps below an integer (e.g. `2.5 / 0.01`),
/// which would otherwise silently drop the last sample.
const RATIO_SLACK: f64 = 1e-12;

/// Upper bound on the number of samples along either axis
const MAX_SAMPLES: usize = u32::MAX as usize;

/// Number of whole steps of size `step` that fit in `span`
///
/// Ratios that are not finite or exceed [`MAX_SAMPLES`] are rejected under
/// the parameter `name` rather than saturated by the cast.
fn sample_count(name: &'static str, span: f64, step: f64) -> Result<usize> {
    let ratio = (span / step * (1.0 + RATIO_SLACK)).floor();
    if !ratio.is_finite() || ratio > MAX_SAMPLES as f64 {
        return Err(KdvError::invalid(
            name,
            format!("step {step} gives {ratio} samples over {span}, at most {MAX_SAMPLES} allowed"),
        ));
    }
    Ok(ratio as usize)
}

fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KdvError::invalid(name, format!("must be finite, got {value}")))
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(KdvError::invalid(name, format!("must be positive, got {value}")))
    }
}

/// Immutable periodic grid in space and uniform sampling in time
///
/// # Layout
///
/// ```text
/// x_i = x_min + i·h,   i = 0 … N-1,   N = floor((x_max - x_min) / h)
/// t_j = j·dt,          j = 0 … T-1,   T = floor(t_max / dt)
/// ```
///
/// Index `N` wraps to `0`; `x_max` itself is never sampled.
///
/// # Example
///
/// ```rust
/// use kdv_rs::physics::Grid;
///
/// let grid = Grid::new(-10.0, 50.0, 0.5, 0.01, 2.5).unwrap();
/// assert_eq!(grid.points(), 120);
/// assert_eq!(grid.steps(), 250);
/// assert_eq!(grid.wrap(-1), 119);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x_min: f64,
    x_max: f64,
    h: f64,
    coordinates: Vec<f64>,
    dt: f64,
    t_max: f64,
    steps: usize,
}

impl Grid {
    /// Build and validate a grid
    ///
    /// # Errors
    ///
    /// [`KdvError::InvalidParameter`] when `h <= 0`, `dt <= 0`,
    /// `x_max <= x_min`, `t_max <= 0`, any value is not finite, or the
    /// resulting grid would have fewer than 2 points, no time level, or more
/// than `u32::MAX` samples along either axis.
    pub fn new(x_min: f64, x_max: f64, h: f64, dt: f64, t_max: f64) -> Result<Self> {
        require_finite("x_min", x_min)?;
        require_finite("x_max", x_max)?;
        require_positive("h", h)?;
        require_positive("dt", dt)?;
        require_positive("t_max", t_max)?;

        if x_max <= x_min {
            return Err(KdvError::invalid(
                "x_max",
                format!("must be greater than x_min ({x_min}), got {x_max}"),
            ));
        }

        let points = sample_count("h", x_max - x_min, h)?;
        if points < 2 {
            return Err(KdvError::invalid(
                "h",
                format!("step {h} leaves fewer than 2 points on [{x_min}, {x_max})"),
            ));
        }

        let steps = sample_count("dt", t_max, dt)?;
        if steps == 0 {
            return Err(KdvError::invalid(
                "dt",
                format!("time step {dt} is larger than t_max ({t_max})"),
            ));
        }

        let coordinates = (0..points).map(|i| x_min + (i as f64) * h).collect();

        Ok(Self {
            x_min,
            x_max,
            h,
            coordinates,
            dt,
            t_max,
            steps,
        })
    }

    /// Number of spatial points `N`
    pub fn points(&self) -> usize {
        self.coordinates.len()
    }

    /// Spatial step `h`
    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Length of the ring, `N·h`
    pub fn length(&self) -> f64 {
        self.points() as f64 * self.h
    }

    /// Sample coordinates `x_0 … x_{N-1}`
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Coordinate of sample `i`, taken modulo `N`
    pub fn x(&self, i: usize) -> f64 {
        self.coordinates[i % self.points()]
    }

    /// Map any signed index onto the ring `0 … N-1`
    pub fn wrap(&self, i: isize) -> usize {
        i.rem_euclid(self.points() as isize) as usize
    }

    /// Time step `dt`
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Number of time levels `T` (the initial condition included)
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time of level `j`
    ///
    /// Computed from the index rather than accumulated to keep rounding
    /// from drifting over long runs.
    pub fn time(&self, j: usize) -> f64 {
        (j as f64) * self.dt
    }

    /// Times of all `T` levels
    pub fn time_points(&self) -> Vec<f64> {
        (0..self.steps).map(|j| self.time(j)).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_run_dimensions() {
        let grid = Grid::new(-10.0, 50.0, 0.5, 0.01, 2.5).unwrap();

        assert_eq!(grid.points(), 120);
        assert_eq!(grid.steps(), 250);
        assert_relative_eq!(grid.coordinates()[0], -10.0);
        assert_relative_eq!(grid.coordinates()[119], 49.5);
        assert_relative_eq!(grid.length(), 60.0);
    }

    #[test]
    fn test_non_integer_span_is_floored() {
        let grid = Grid::new(0.0, 10.0, 3.0, 0.3, 1.0).unwrap();

        assert_eq!(grid.points(), 3);
        assert_eq!(grid.steps(), 3);
    }

    #[test]
    fn test_rounding_does_not_drop_a_sample() {
        // 0.7 / 0.1 evaluates to 6.999999999999999 in binary floating point
        let grid = Grid::new(0.0, 0.7, 0.1, 0.1, 0.7).unwrap();

        assert_eq!(grid.points(), 7);
        assert_eq!(grid.steps(), 7);
    }

    #[test]
    fn test_wrap_is_periodic() {
        let grid = Grid::new(0.0, 10.0, 1.0, 0.1, 1.0).unwrap();

        assert_eq!(grid.wrap(-1), 9);
        assert_eq!(grid.wrap(-2), 8);
        assert_eq!(grid.wrap(10), 0);
        assert_eq!(grid.wrap(11), 1);
        assert_relative_eq!(grid.x(10), grid.x(0));
    }

    #[test]
    fn test_time_points() {
        let grid = Grid::new(0.0, 1.0, 0.1, 0.25, 1.0).unwrap();
        let times = grid.time_points();

        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_rejects_non_positive_steps() {
        assert!(matches!(
            Grid::new(0.0, 1.0, 0.0, 0.1, 1.0),
            Err(KdvError::InvalidParameter { name: "h", .. })
        ));
        assert!(matches!(
            Grid::new(0.0, 1.0, 0.1, -0.1, 1.0),
            Err(KdvError::InvalidParameter { name: "dt", .. })
        ));
        assert!(matches!(
            Grid::new(0.0, 1.0, 0.1, 0.1, 0.0),
            Err(KdvError::InvalidParameter { name: "t_max", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(matches!(
            Grid::new(5.0, 1.0, 0.1, 0.1, 1.0),
            Err(KdvError::InvalidParameter { name: "x_max", .. })
        ));
        assert!(Grid::new(1.0, 1.0, 0.1, 0.1, 1.0).is_err());
    }

    #[test]
    fn test_rejects_degenerate_sampling() {
        assert!(Grid::new(0.0, 1.0, 0.8, 0.1, 1.0).is_err());
        assert!(Grid::new(0.0, 1.0, 0.1, 2.0, 1.0).is_err());
        assert!(Grid::new(f64::NAN, 1.0, 0.1, 0.1, 1.0).is_err());
    }

    #[test]
    fn test_rejects_oversized_sampling() {
        assert!(matches!(
            Grid::new(0.0, 1.0, 0.1, 1e-300, 1.0),
            Err(KdvError::InvalidParameter { name: "dt", .. })
        ));
        assert!(matches!(
            Grid::new(0.0, 1e300, 1e-10, 0.1, 1.0),
            Err(KdvError::InvalidParameter { name: "h", .. })
        ));
        // Overflow of the ratio itself
        assert!(Grid::new(-1e300, 1e300, 1e-300, 0.1, 1.0).is_err());
    }
}
