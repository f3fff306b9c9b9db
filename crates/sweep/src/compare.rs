//! Pointwise comparison of a series against the baseline series.

use thiserror::Error;

use crate::series::Series;

/// Errors that can occur when comparing a series to the baseline.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    #[error("series has {series_len} points but the baseline has {baseline_len}")]
    Alignment {
        series_len: usize,
        baseline_len: usize,
    },

    #[error("baseline is zero at grid index {index}")]
    DivisionByZero { index: usize },

    #[error("grid index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Percent deviation of a series from the baseline, one value per redshift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeviationSeries {
    percent: Vec<f64>,
}

impl DeviationSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.percent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.percent.is_empty()
    }

    /// Returns the deviations in percent, aligned with the grid.
    #[must_use]
    pub fn percent(&self) -> &[f64] {
        &self.percent
    }

    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.percent.last().copied()
    }
}

/// Computes `(series - baseline) / baseline × 100` at every grid index.
///
/// # Errors
///
/// Returns [`CompareError::Alignment`] if the series lengths differ, and
/// [`CompareError::DivisionByZero`] for the first index whose baseline value
/// is exactly zero.
pub fn deviation(series: &Series, baseline: &Series) -> Result<DeviationSeries, CompareError> {
    check_alignment(series, baseline)?;

    let percent = series
        .millikelvin()
        .zip(baseline.millikelvin())
        .enumerate()
        .map(|(index, (value, standard))| percent_change(value, standard, index))
        .collect::<Result<_, _>>()?;

    Ok(DeviationSeries { percent })
}

/// Computes the percent deviation at a single grid index.
///
/// # Errors
///
/// Returns [`CompareError::Alignment`] if the series lengths differ,
/// [`CompareError::IndexOutOfRange`] if `index` is past the end, and
/// [`CompareError::DivisionByZero`] if the baseline value at `index` is zero.
pub fn deviation_at(series: &Series, baseline: &Series, index: usize) -> Result<f64, CompareError> {
    check_alignment(series, baseline)?;

    match (series.get(index), baseline.get(index)) {
        (Some(value), Some(standard)) => {
            percent_change(value.millikelvin(), standard.millikelvin(), index)
        }
        _ => Err(CompareError::IndexOutOfRange {
            index,
            len: baseline.len(),
        }),
    }
}

fn check_alignment(series: &Series, baseline: &Series) -> Result<(), CompareError> {
    if series.len() == baseline.len() {
        Ok(())
    } else {
        Err(CompareError::Alignment {
            series_len: series.len(),
            baseline_len: baseline.len(),
        })
    }
}

#[allow(clippy::float_cmp)]
fn percent_change(value: f64, standard: f64, index: usize) -> Result<f64, CompareError> {
    if standard == 0.0 {
        return Err(CompareError::DivisionByZero { index });
    }
    Ok((value - standard) / standard * 100.0)
}
