//! Append-only field history
//!
//! One [`Field`] per time level, index `0` being the initial condition.
//! Only the solver appends; everything downstream reads.

use std::ops::Index;

use ndarray::Array2;

use crate::error::{KdvError, Result};
use crate::physics::Field;

/// Sequence of `T` fields indexed by time step
///
/// # Example
///
/// ```rust
/// use kdv_rs::physics::Field;
/// use kdv_rs::solver::StateHistory;
///
/// let history = StateHistory::from_fields(vec![
///     Field::from_vec(vec![1.0, 0.0, 0.0]),
///     Field::from_vec(vec![0.5, 0.5, 0.0]),
/// ]).unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.points(), 3);
/// assert_eq!(history.to_array()[[1, 1]], 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateHistory {
    fields: Vec<Field>,
}

impl StateHistory {
    /// Empty history with room for `steps` fields
    pub(crate) fn with_capacity(steps: usize) -> Self {
        Self {
            fields: Vec::with_capacity(steps),
        }
    }

    /// Append the next time level
    pub(crate) fn push(&mut self, field: Field) {
        debug_assert!(
            self.fields.first().is_none_or(|first| first.len() == field.len()),
            "field length changed during the run"
        );
        self.fields.push(field);
    }

    /// Wrap fields produced elsewhere (e.g. a stored run)
    ///
    /// # Errors
    ///
    /// [`KdvError::ShapeMismatch`] when the fields do not all have the
    /// length of the first one.
    pub fn from_fields(fields: Vec<Field>) -> Result<Self> {
        if let Some(first) = fields.first() {
            let expected = first.len();
            if let Some(bad) = fields.iter().find(|f| f.len() != expected) {
                return Err(KdvError::ShapeMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Number of stored time levels
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of spatial points per field (0 when empty)
    pub fn points(&self) -> usize {
        self.fields.first().map_or(0, |f| f.len())
    }

    /// Field at time level `step`
    pub fn get(&self, step: usize) -> Option<&Field> {
        self.fields.get(step)
    }

    pub fn initial(&self) -> Option<&Field> {
        self.fields.first()
    }

    pub fn final_state(&self) -> Option<&Field> {
        self.fields.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    /// Copy into a dense `time × space` array
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), self.points()), |(j, i)| self.fields[j][i])
    }
}

impl Index<usize> for StateHistory {
    type Output = Field;

    fn index(&self, step: usize) -> &Field {
        &self.fields[step]
    }
}

impl<'a> IntoIterator for &'a StateHistory {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
