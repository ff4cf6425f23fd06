//! Peak velocity estimation
//!
//! The peak position is quantised to the grid and jumps back by the domain
//! length whenever the wave crosses the periodic boundary. Differencing it
//! naively gives long runs of zeros and one large negative spike per wrap.
//!
//! [`VelocityEstimator`] works around both with a small state machine over
//! a cursor `j_store` (the last confirmed reading), the set of offsets
//! ignored at that cursor, and the velocities confirmed so far:
//!
//! | state     | condition                                              | action                                            | next      |
//! |-----------|--------------------------------------------------------|---------------------------------------------------|-----------|
//! | Scanning  | first non-ignored `Δ ≥ 1` with `raw ≠ 0` has `raw > 0` | push `raw`, `j_store += Δ`, clear ignore set      | Confirmed |
//! | Scanning  | `raw < 0`, nothing confirmed yet                       | ignore `Δ` at this cursor                         | Scanning  |
//! | Scanning  | `raw < 0`, a velocity already confirmed                | push last velocity, `j_store += Δ`, clear ignore  | Confirmed |
//! | Scanning  | no non-zero reading up to the end of the series        |                                                   | Done      |
//! | Confirmed | `j_store < T`                                          |                                                   | Scanning  |
//! | Confirmed | `j_store ≥ T`                                          |                                                   | Done      |
//!
//! with `raw = (p[j_store + Δ] - p[j_store]) / (t[j_store + Δ] - t[j_store])`.
//!
//! On Done the first velocity is replaced by the second one, when there is
//! a second one: the very first reading is dominated by start-up jitter of
//! the peak.
//!
//! This is a heuristic tuned to a wave moving in the positive direction.
//! A wave that genuinely moves left is reported with the velocity of its
//! first rightward reading, or not at all.

use std::collections::BTreeSet;

use log::debug;
use ndarray::Array1;

use crate::error::{KdvError, Result};

/// Named states of [`VelocityEstimator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorState {
    /// Looking for the next non-zero displacement from the cursor
    Scanning,
    /// A reading was just recorded and the cursor moved
    Confirmed,
    /// No further readings can be produced
    Done,
}

/// Explicit state machine turning a peak-position series into velocities
///
/// # Example
///
/// ```rust
/// use kdv_rs::diagnostics::{EstimatorState, VelocityEstimator};
///
/// let times = [0.0, 0.1, 0.2, 0.3];
/// let positions = [0.0, 0.0, 0.5, 0.5];
///
/// let mut estimator = VelocityEstimator::new(&positions, &times).unwrap();
/// assert_eq!(estimator.advance(), EstimatorState::Confirmed);
/// assert_eq!(estimator.cursor(), 2);
///
/// let velocities = estimator.run();
/// assert_eq!(velocities.len(), 1);
/// assert!((velocities[0] - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct VelocityEstimator<'a> {
    positions: &'a [f64],
    times: &'a [f64],
    state: EstimatorState,
    cursor: usize,
    ignored: BTreeSet<usize>,
    velocities: Vec<f64>,
}

impl<'a> VelocityEstimator<'a> {
    /// Start scanning from `j_store = 0`
    ///
    /// # Errors
    ///
    /// [`KdvError::ShapeMismatch`] when the two series differ in length.
    pub fn new(positions: &'a [f64], times: &'a [f64]) -> Result<Self> {
        if positions.len() != times.len() {
            return Err(KdvError::ShapeMismatch {
                expected: times.len(),
                actual: positions.len(),
            });
        }

        Ok(Self {
            positions,
            times,
            state: EstimatorState::Scanning,
            cursor: 0,
            ignored: BTreeSet::new(),
            velocities: Vec::new(),
        })
    }

    pub fn state(&self) -> EstimatorState {
        self.state
    }

    /// Index of the last confirmed reading
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Offsets skipped at the current cursor
    pub fn ignored(&self) -> &BTreeSet<usize> {
        &self.ignored
    }

    /// Velocities confirmed so far, first entry not yet replaced
    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Perform one transition and return the new state
    pub fn advance(&mut self) -> EstimatorState {
        let current = self.state;
        self.state = match current {
            EstimatorState::Scanning => self.scan(),
            EstimatorState::Confirmed if self.cursor < self.positions.len() => EstimatorState::Scanning,
            EstimatorState::Confirmed | EstimatorState::Done => EstimatorState::Done,
        };
        self.state
    }

    /// Drive the machine to Done and return the final velocity sequence
    pub fn run(mut self) -> Vec<f64> {
        let mut transitions = 0usize;
        while self.advance() != EstimatorState::Done {
            transitions += 1;
        }

        debug!(
            "velocity estimator: {} readings from {} positions in {} transitions",
            self.velocities.len(),
            self.positions.len(),
            transitions
        );

        if self.velocities.len() >= 2 {
            self.velocities[0] = self.velocities[1];
        }
        self.velocities
    }

    fn scan(&mut self) -> EstimatorState {
        let origin = self.cursor;
        let remaining = self.positions.len().saturating_sub(origin);

        for offset in 1..remaining {
            if self.ignored.contains(&offset) {
                continue;
            }

            let target = origin + offset;
            let raw = (self.positions[target] - self.positions[origin])
                / (self.times[target] - self.times[origin]);
            if raw == 0.0 {
                continue;
            }

            if raw < 0.0 {
                match self.velocities.last().copied() {
                    None => {
                        // Wrap before anything was confirmed: retry from the same cursor
                        self.ignored.insert(offset);
                        return EstimatorState::Scanning;
                    }
                    Some(last) => self.confirm(last, offset),
                }
            } else {
                self.confirm(raw, offset);
            }
            return EstimatorState::Confirmed;
        }

        EstimatorState::Done
    }

    fn confirm(&mut self, velocity: f64, offset: usize) {
        self.velocities.push(velocity);
        self.cursor += offset;
        self.ignored.clear();
    }
}

/// Velocities with evenly spaced time stamps over `[0, t_max]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VelocitySeries {
    pub time_points: Vec<f64>,
    pub velocity: Vec<f64>,
}

impl VelocitySeries {
    /// Run a [`VelocityEstimator`] over a peak-position series
    ///
    /// The estimator samples the series irregularly; the time stamps are
    /// reconstructed as `len` evenly spaced points from `0` to `t_max`
    /// (a single reading is stamped `0`).
    pub fn estimate(positions: &[f64], times: &[f64], t_max: f64) -> Result<Self> {
        let velocity = VelocityEstimator::new(positions, times)?.run();
        let time_points = Array1::linspace(0.0, t_max, velocity.len()).to_vec();

        Ok(Self {
            time_points,
            velocity,
        })
    }

    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    /// Mean of the readings, `None` when there are none
    pub fn mean(&self) -> Option<f64> {
        if self.velocity.is_empty() {
            None
        } else {
            Some(self.velocity.iter().sum::<f64>() / self.velocity.len() as f64)
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn times(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|j| j as f64 * dt).collect()
    }

    #[test]
    fn test_constant_velocity_across_wrap() {
        let t = times(30, 0.1);
        // c = 2, domain length 10, wraps between j = 14 and j = 15
        let p: Vec<f64> = t
            .iter()
            .enumerate()
            .map(|(j, &tj)| 2.0 * tj + if j >= 15 { -10.0 } else { 0.0 })
            .collect();
        assert!(p[15] < p[14]);

        let series = VelocitySeries::estimate(&p, &t, 2.9).unwrap();

        assert_eq!(series.len(), 29);
        for v in &series.velocity {
            assert_relative_eq!(*v, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_negative_reading_ignored_before_first_confirmation() {
        let t = times(8, 0.1);
        let p = [5.0, 4.0, 5.0, 5.2, 5.4, 5.6, 5.8, 6.0];

        let mut estimator = VelocityEstimator::new(&p, &t).unwrap();

        assert_eq!(estimator.advance(), EstimatorState::Scanning);
        assert_eq!(estimator.cursor(), 0);
        assert!(estimator.ignored().contains(&1));
        assert!(estimator.velocities().is_empty());

        // Δ = 1 skipped, Δ = 2 is zero, Δ = 3 confirms
        assert_eq!(estimator.advance(), EstimatorState::Confirmed);
        assert_eq!(estimator.cursor(), 3);
        assert!(estimator.ignored().is_empty());
        assert_relative_eq!(estimator.velocities()[0], 0.2 / 0.3, epsilon = 1e-9);

        let velocities = estimator.run();
        assert_eq!(velocities.len(), 5);
        // First reading replaced by the second
        for v in &velocities {
            assert_relative_eq!(*v, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_negative_reading_after_confirmation_repeats_last() {
        let t = times(5, 1.0);
        let p = [0.0, 1.0, 3.0, -5.0, -4.0];

        let mut estimator = VelocityEstimator::new(&p, &t).unwrap();
        while estimator.advance() != EstimatorState::Done {}

        assert_eq!(estimator.velocities(), &[1.0, 2.0, 2.0, 1.0]);
        assert_eq!(estimator.cursor(), 4);
    }

    #[test]
    fn test_quantised_plateaus() {
        let h = 0.5;
        let dt = 0.01;
        let t = times(26, dt);
        let p: Vec<f64> = (0..26).map(|j| h * (j / 5) as f64).collect();

        let series = VelocitySeries::estimate(&p, &t, 0.25).unwrap();

        assert_eq!(series.len(), 5);
        for v in &series.velocity {
            assert_relative_eq!(*v, h / (5.0 * dt), max_relative = 1e-9);
        }
        assert_relative_eq!(series.mean().unwrap(), 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_exhaustion_ends_early() {
        let t = times(6, 1.0);
        let p = [0.0, 1.0, 2.0, 2.0, 2.0, 2.0];

        let mut estimator = VelocityEstimator::new(&p, &t).unwrap();
        while estimator.advance() != EstimatorState::Done {}

        assert_eq!(estimator.cursor(), 2);
        assert_eq!(estimator.velocities(), &[1.0, 1.0]);
        assert_eq!(estimator.advance(), EstimatorState::Done);
    }

    #[test]
    fn test_time_stamps_span_t_max() {
        let t = times(6, 1.0);
        let p = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

        let series = VelocitySeries::estimate(&p, &t, 5.0).unwrap();

        assert_eq!(series.time_points.len(), 5);
        assert_relative_eq!(series.time_points[0], 0.0);
        assert_relative_eq!(series.time_points[4], 5.0);
        assert_relative_eq!(series.time_points[1], 1.25);
    }

    #[test]
    fn test_single_reading_is_kept() {
        let series = VelocitySeries::estimate(&[0.0, 3.0], &[0.0, 1.0], 1.0).unwrap();

        assert_eq!(series.velocity, vec![3.0]);
        assert_eq!(series.time_points, vec![0.0]);
    }

    #[test]
    fn test_empty_and_static_series() {
        let empty = VelocitySeries::estimate(&[], &[], 1.0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.mean(), None);

        let flat = VelocitySeries::estimate(&[1.0; 4], &[0.0, 1.0, 2.0, 3.0], 3.0).unwrap();
        assert!(flat.is_empty());
        assert!(flat.time_points.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            VelocityEstimator::new(&[0.0, 1.0], &[0.0]),
            Err(KdvError::ShapeMismatch { expected: 1, actual: 2 })
        ));
    }
}
