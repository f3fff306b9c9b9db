//! Reduction of a simulated field to its mean brightness temperature.

use std::fmt;

use thiserror::Error;
use uom::si::{f64::TemperatureInterval, temperature_interval::millikelvin};

/// Errors that can occur when reducing a field to a scalar.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ReductionError {
    #[error("field has no cells")]
    Empty,

    #[error("field cell {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
}

/// The mean brightness temperature at one parameter set and redshift, in mK.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Observable(f64);

impl Observable {
    /// Wraps a brightness temperature given in millikelvin.
    #[must_use]
    pub fn from_millikelvin(value: f64) -> Self {
        Self(value)
    }

    /// Returns the brightness temperature in millikelvin.
    #[must_use]
    pub fn millikelvin(self) -> f64 {
        self.0
    }

    /// Returns the brightness temperature as a dimensioned quantity.
    #[must_use]
    pub fn temperature(self) -> TemperatureInterval {
        TemperatureInterval::new::<millikelvin>(self.0)
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*} mK", precision, self.0),
            None => write!(f, "{} mK", self.0),
        }
    }
}

/// Collapses a field to the arithmetic mean of its cells.
///
/// Non-finite cells are reported rather than averaged, since a single
/// corrupted cell would silently shift every comparison built on the mean.
/// A field of finite cells always reduces, even when their plain sum would
/// overflow.
///
/// # Errors
///
/// Returns [`ReductionError::Empty`] for an empty field and
/// [`ReductionError::NonFinite`] for the first NaN or infinite cell.
pub fn reduce(field: &[f64]) -> Result<Observable, ReductionError> {
    if field.is_empty() {
        return Err(ReductionError::Empty);
    }

    let mut sum = 0.0;
    for (index, &value) in field.iter().enumerate() {
        if !value.is_finite() {
            return Err(ReductionError::NonFinite { index, value });
        }
        sum += value;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = field.len() as f64;

    if sum.is_finite() {
        return Ok(Observable(sum / len));
    }

    // The sum overflowed, so average the cells scaled into [-1, 1] instead.
    let scale = field.iter().fold(0.0_f64, |max, value| max.max(value.abs()));
    let scaled: f64 = field.iter().map(|value| value / scale).sum();

    Ok(Observable(scaled / len * scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn averages_all_cells() {
        let observable = reduce(&[8.0, 10.0, 12.0, 10.0]).unwrap();
        assert_relative_eq!(observable.millikelvin(), 10.0);
    }

    #[test]
    fn handles_negative_temperatures() {
        // Absorption troughs are negative.
        let observable = reduce(&[-150.0, -50.0]).unwrap();
        assert_relative_eq!(observable.millikelvin(), -100.0);
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(reduce(&[]), Err(ReductionError::Empty));
    }

    #[test]
    fn rejects_non_finite_cells() {
        assert!(matches!(
            reduce(&[1.0, f64::NAN, 2.0]),
            Err(ReductionError::NonFinite { index: 1, .. })
        ));
        assert!(matches!(
            reduce(&[1.0, 2.0, f64::NEG_INFINITY]),
            Err(ReductionError::NonFinite { index: 2, .. })
        ));
    }

    #[test]
    fn averages_cells_whose_sum_overflows() {
        let observable = reduce(&[f64::MAX, f64::MAX]).unwrap();
        assert_relative_eq!(observable.millikelvin(), f64::MAX);

        let observable = reduce(&[f64::MAX, f64::MAX, -f64::MAX]).unwrap();
        assert_relative_eq!(observable.millikelvin(), f64::MAX / 3.0);

        let observable = reduce(&[f64::MAX, f64::MAX, -f64::MAX, -f64::MAX]).unwrap();
        assert_relative_eq!(observable.millikelvin(), 0.0);
    }

    #[test]
    fn converts_to_a_temperature_interval() {
        use uom::si::temperature_interval::kelvin;

        let observable = Observable::from_millikelvin(25.0);
        assert_relative_eq!(observable.temperature().get::<kelvin>(), 0.025);
        assert_eq!(format!("{observable:.1}"), "25.0 mK");
    }
}
