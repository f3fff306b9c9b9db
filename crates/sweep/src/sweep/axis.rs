use tbsweep_core::{Model, Observer};

use crate::{
    grid::RedshiftGrid,
    params::{Parameter, ParameterAxis, ParameterSet},
    series::Series,
    simulation::SimulationInput,
};

use super::{Action, Config, Error, Event, describe, sweep_series};

/// One axis value and the series computed for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisEntry {
    pub value: f64,
    pub series: Series,
}

/// An axis value the observer chose to skip after it failed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkippedValue {
    pub value: f64,

    /// The failure, rendered with its sources.
    pub reason: String,
}

/// The series for every value of one parameter axis, in axis order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AxisSweep {
    parameter: Parameter,
    entries: Vec<AxisEntry>,
    skipped: Vec<SkippedValue>,
}

impl AxisSweep {
    pub(crate) fn new(parameter: Parameter) -> Self {
        Self {
            parameter,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, value: f64, series: Series) {
        self.entries.push(AxisEntry { value, series });
    }

    #[must_use]
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Returns the number of axis values with a series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the series for an exact axis value.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn get(&self, value: f64) -> Option<&Series> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| &entry.series)
    }

    #[must_use]
    pub fn entries(&self) -> &[AxisEntry] {
        &self.entries
    }

    /// Iterates over `(value, series)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Series)> {
        self.entries.iter().map(|entry| (entry.value, &entry.series))
    }

    /// Returns the axis values that failed and were skipped.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedValue] {
        &self.skipped
    }
}

pub(crate) fn sweep_axis<M, Obs>(
    model: &M,
    grid: &RedshiftGrid,
    baseline: &ParameterSet,
    axis: &ParameterAxis,
    config: &Config,
    observer: &mut Obs,
) -> Result<AxisSweep, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let parameter = axis.parameter();
    let mut sweep = AxisSweep::new(parameter);

    for &value in axis.values() {
        if config.cancel_flag().is_cancelled() {
            return Err(Error::Cancelled);
        }

        let parameters = baseline.with_unchecked(parameter, value);
        let result = sweep_series(model, grid, &parameters, config, observer);

        let error = match result {
            Ok(series) => {
                tracing::info!(%parameter, value, "axis value complete");
                sweep.push(value, series);
                continue;
            }
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(error) => error,
        };

        let action = observer.observe(&Event::ValueFailed {
            parameter,
            value,
            error: &error,
        });

        match action {
            Some(Action::Skip) => {
                let reason = describe(&error);
                tracing::warn!(%parameter, value, %reason, "skipping failed axis value");
                sweep.skipped.push(SkippedValue { value, reason });
            }
            Some(Action::StopEarly) => {
                config.cancel_flag().cancel();
                return Err(Error::Cancelled);
            }
            None => return Err(error),
        }
    }

    Ok(sweep)
}
