//! Peak tracking
//!
//! Follows the global maximum of each stored field. Once a run has gone
//! unstable, amplitude and position are pinned to zero for every later step.

use crate::physics::{Field, Grid};
use crate::solver::{StabilityReport, StateHistory};

/// Index and value of the maximum of `field`
///
/// Ties resolve to the lowest index. Returns `None` for an empty field.
/// NaN samples never compare greater, so they are skipped.
///
/// # Example
///
/// ```rust
/// use kdv_rs::diagnostics::find_peak;
/// use kdv_rs::physics::Field;
///
/// let field = Field::from_vec(vec![0.0, 3.0, 1.0, 3.0]);
/// assert_eq!(find_peak(&field), Some((1, 3.0)));
/// ```
pub fn find_peak(field: &Field) -> Option<(usize, f64)> {
    let mut iter = field.iter().copied().enumerate();
    let first = iter.next()?;

    Some(iter.fold(first, |best, (i, v)| if v > best.1 { (i, v) } else { best }))
}

/// Peak position and amplitude per time level
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeakSeries {
    /// Grid coordinate of the maximum
    pub positions: Vec<f64>,
    /// Value of the maximum
    pub amplitudes: Vec<f64>,
}

/// Track the maximum of every field in `history`
///
/// Steps at or after `stability.first_unstable_step` get position and
/// amplitude `0`.
pub fn track_peaks(history: &StateHistory, grid: &Grid, stability: &StabilityReport) -> PeakSeries {
    let mut series = PeakSeries {
        positions: Vec::with_capacity(history.len()),
        amplitudes: Vec::with_capacity(history.len()),
    };

    for (step, field) in history.iter().enumerate() {
        let peak = if stability.is_unstable_at(step) {
            None
        } else {
            find_peak(field)
        };

        match peak {
            Some((index, amplitude)) => {
                series.positions.push(grid.x(index));
                series.amplitudes.push(amplitude);
            }
            None => {
                series.positions.push(0.0);
                series.amplitudes.push(0.0);
            }
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(-2.0, 2.0, 1.0, 0.1, 0.4).unwrap()
    }

    #[test]
    fn test_first_maximum_wins() {
        let field = Field::from_vec(vec![1.0, 5.0, 2.0, 5.0]);
        assert_eq!(find_peak(&field), Some((1, 5.0)));
        assert_eq!(find_peak(&Field::zeros(0)), None);
    }

    #[test]
    fn test_negative_field_peak() {
        let field = Field::from_vec(vec![-3.0, -1.0, -2.0]);
        assert_eq!(find_peak(&field), Some((1, -1.0)));
    }

    #[test]
    fn test_track_positions_use_grid_coordinates() {
        let history = StateHistory::from_fields(vec![
            Field::from_vec(vec![0.0, 0.0, 1.0, 0.0]),
            Field::from_vec(vec![0.0, 0.0, 0.0, 2.0]),
        ])
        .unwrap();

        let peaks = track_peaks(&history, &grid(), &StabilityReport::stable());

        assert_eq!(peaks.positions, vec![0.0, 1.0]);
        assert_eq!(peaks.amplitudes, vec![1.0, 2.0]);
    }

    #[test]
    fn test_unstable_tail_is_zeroed() {
        let history = StateHistory::from_fields(vec![
            Field::from_vec(vec![0.0, 4.0, 0.0, 0.0]),
            Field::from_vec(vec![0.0, f64::INFINITY, 0.0, 0.0]),
            // finite again but still after the first blow-up
            Field::from_vec(vec![0.0, 0.0, 7.0, 0.0]),
        ])
        .unwrap();
        let stability = crate::solver::scan_stability(&history);

        let peaks = track_peaks(&history, &grid(), &stability);

        assert_eq!(peaks.amplitudes, vec![4.0, 0.0, 0.0]);
        assert_eq!(peaks.positions, vec![-1.0, 0.0, 0.0]);
    }
}
