//! The sweep engine.
//!
//! [`run_sweep`] evaluates the simulation at every redshift of a grid for one
//! parameter set and reduces each field to its mean, producing a [`Series`]
//! aligned index-for-index with the grid. [`run_axis_sweep`] repeats that for
//! every value of a [`ParameterAxis`], overriding one parameter of the
//! baseline at a time.
//!
//! # Failure policy
//!
//! A series is all or nothing: the first failed point (simulation error,
//! reduction error, or cancellation) fails the whole series. For axis sweeps
//! the observer sees an [`Event::ValueFailed`] and decides whether to skip
//! the value ([`Action::Skip`]), cancel ([`Action::StopEarly`]), or let the
//! axis sweep fail (no action). The unobserved variants always fail.
//!
//! # Observer events
//!
//! - [`Event::PointEvaluated`]: after each redshift (in grid order)
//! - [`Event::SeriesCompleted`]: after the last redshift of a series
//! - [`Event::ValueFailed`]: when an axis value's series fails
//!
//! Returning [`Action::StopEarly`] from any event fails the run with
//! [`Error::Cancelled`]. Only that run is stopped: each run watches its own
//! child of the config's [`CancelFlag`](crate::CancelFlag), so the same
//! [`Config`] can be used again afterwards.

mod action;
mod axis;
mod config;
mod error;
mod event;
mod point;


pub use action::Action;
pub use axis::{AxisEntry, AxisSweep, SkippedValue};
pub use config::{Config, Execution};
pub use error::Error;
pub use event::Event;

pub(crate) use axis::sweep_axis;
pub(crate) use error::describe;

use tbsweep_core::{Model, Observer};

use crate::{
    grid::RedshiftGrid,
    params::{ParameterAxis, ParameterSet},
    series::Series,
    simulation::SimulationInput,
};

/// Evaluates one parameter set at every redshift of the grid.
///
/// # Errors
///
/// Returns an error if any simulation call or reduction fails, or if the
/// sweep is cancelled. No partial series is returned.
pub fn run_sweep<M, Obs>(
    model: &M,
    grid: &RedshiftGrid,
    parameters: &ParameterSet,
    config: &Config,
    mut observer: Obs,
) -> Result<Series, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    sweep_series(model, grid, parameters, &config.for_run(), &mut observer)
}

/// Evaluates one parameter set without observation.
///
/// # Errors
///
/// Returns an error if any simulation call or reduction fails.
pub fn run_sweep_unobserved<M>(
    model: &M,
    grid: &RedshiftGrid,
    parameters: &ParameterSet,
    config: &Config,
) -> Result<Series, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
{
    run_sweep(model, grid, parameters, config, ())
}

/// Evaluates every value of an axis, holding the other parameters at the baseline.
///
/// The result maps each axis value, in axis order, to its series. Values the
/// observer chose to skip are listed in [`AxisSweep::skipped`].
///
/// # Errors
///
/// Returns an error if an axis value fails and the observer does not return
/// [`Action::Skip`], or if the sweep is cancelled.
pub fn run_axis_sweep<M, Obs>(
    model: &M,
    grid: &RedshiftGrid,
    baseline: &ParameterSet,
    axis: &ParameterAxis,
    config: &Config,
    mut observer: Obs,
) -> Result<AxisSweep, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    sweep_axis(model, grid, baseline, axis, &config.for_run(), &mut observer)
}

/// Evaluates every value of an axis without observation.
///
/// # Errors
///
/// Returns an error on the first axis value that fails.
pub fn run_axis_sweep_unobserved<M>(
    model: &M,
    grid: &RedshiftGrid,
    baseline: &ParameterSet,
    axis: &ParameterAxis,
    config: &Config,
) -> Result<AxisSweep, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
{
    run_axis_sweep(model, grid, baseline, axis, config, ())
}

/// Builds one series, emitting point and completion events.
pub(crate) fn sweep_series<M, Obs>(
    model: &M,
    grid: &RedshiftGrid,
    parameters: &ParameterSet,
    config: &Config,
    observer: &mut Obs,
) -> Result<Series, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let cancel = config.cancel_flag();
    let mut emit = |event: &Event<'_>| -> Result<(), Error> {
        if let Some(Action::StopEarly) = observer.observe(event) {
            cancel.cancel();
            return Err(Error::Cancelled);
        }
        Ok(())
    };

    let values = match config.execution() {
        Execution::Sequential => {
            let mut values = Vec::with_capacity(grid.len());
            for (index, redshift) in grid.iter().enumerate() {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                let observable = point::evaluate(model, parameters, index, redshift)?;
                values.push(observable);
                emit(&Event::PointEvaluated {
                    parameters,
                    index,
                    redshift,
                    observable,
                })?;
            }
            values
        }

        #[cfg(feature = "parallel")]
        Execution::Parallel => {
            let values = point::evaluate_parallel(model, grid, parameters, cancel)?;
            for (index, (redshift, &observable)) in grid.iter().zip(&values).enumerate() {
                emit(&Event::PointEvaluated {
                    parameters,
                    index,
                    redshift,
                    observable,
                })?;
            }
            values
        }
    };

    let series = Series::new(*parameters, values);
    emit(&Event::SeriesCompleted { series: &series })?;

    Ok(series)
}
