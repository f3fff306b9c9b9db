use thiserror::Error;

/// Errors raised when constructing a [`RedshiftGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("redshift grid must contain at least one point")]
    Empty,

    #[error("redshift {value} at index {index} must be finite and non-negative")]
    InvalidRedshift { index: usize, value: f64 },

    #[error("redshifts must be strictly decreasing, but z[{index}] = {value} follows {previous}")]
    NotDecreasing {
        index: usize,
        value: f64,
        previous: f64,
    },
}

/// An ordered sequence of redshifts shared by every series in a study.
///
/// Redshifts are finite, non-negative, and strictly decreasing, so a grid
/// runs from the early universe toward the present (for example 30 → 5).
/// Series produced by the sweep align with the grid index-for-index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RedshiftGrid {
    redshifts: Vec<f64>,
}

impl RedshiftGrid {
    /// Creates a grid from explicit redshift values.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, contains a non-finite or
    /// negative value, or is not strictly decreasing.
    pub fn new(redshifts: impl IntoIterator<Item = f64>) -> Result<Self, GridError> {
        let redshifts: Vec<f64> = redshifts.into_iter().collect();

        if redshifts.is_empty() {
            return Err(GridError::Empty);
        }

        for (index, &value) in redshifts.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidRedshift { index, value });
            }
            if index > 0 {
                let previous = redshifts[index - 1];
                if value >= previous {
                    return Err(GridError::NotDecreasing {
                        index,
                        value,
                        previous,
                    });
                }
            }
        }

        Ok(Self { redshifts })
    }

    /// Creates `points` evenly spaced redshifts from `start` down to `end`,
    /// including both ends.
    ///
    /// A single point yields `[start]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is zero or the resulting values do not
    /// form a valid grid (for example `start <= end` with more than one point).
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self, GridError> {
        if points == 0 {
            return Err(GridError::Empty);
        }
        Self::new(linspace_values(start, end, points))
    }

    /// Wraps values already known to form a valid grid.
    pub(crate) fn from_unchecked(redshifts: Vec<f64>) -> Self {
        debug_assert!(Self::new(redshifts.iter().copied()).is_ok());
        Self { redshifts }
    }

    /// Returns the number of redshifts in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.redshifts.len()
    }

    /// Always false; a grid holds at least one redshift.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redshifts.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.redshifts
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.redshifts.iter().copied()
    }

    /// Returns the last (lowest) redshift of the grid.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.redshifts[self.redshifts.len() - 1]
    }
}

/// Evenly spaced values from `start` to `end`, ending exactly on `end`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn linspace_values(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points == 1 {
        return vec![start];
    }

    let step = (end - start) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            if i == points - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
