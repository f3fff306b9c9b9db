//! The sensitivity study: a baseline series plus one sweep per axis.
//!
//! [`run_sensitivity_study`] computes the baseline series first, then sweeps
//! each axis against it, and hands back a [`SweepResult`]. Each step depends
//! on the previous one succeeding. Deviations from the baseline are not
//! stored; reporting code derives them with [`deviation`](crate::deviation).

mod error;
mod plan;
mod result;


pub use error::StudyError;
pub use plan::StudyPlan;
pub use result::SweepResult;

use tbsweep_core::{Model, Observer};

use crate::{
    grid::RedshiftGrid,
    params::{ParameterAxis, ParameterSet},
    simulation::SimulationInput,
    sweep::{self, Action, Config, Event},
};

/// Runs the baseline sweep and every axis sweep.
///
/// The observer sees the events of every series in the order they are
/// computed: the baseline first, then each axis value in axis order. It also
/// decides, through [`Event::ValueFailed`], whether a failed axis value is
/// skipped or fails the study. A failed baseline always fails the study.
///
/// # Errors
///
/// Returns an error if two axes name the same parameter, the baseline fails,
/// an axis value fails without being skipped, or the study is cancelled.
pub fn run_sensitivity_study<M, Obs>(
    model: &M,
    grid: &RedshiftGrid,
    baseline: &ParameterSet,
    axes: &[ParameterAxis],
    config: &Config,
    mut observer: Obs,
) -> Result<SweepResult, StudyError>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    for (i, axis) in axes.iter().enumerate() {
        let parameter = axis.parameter();
        if axes[..i].iter().any(|seen| seen.parameter() == parameter) {
            return Err(StudyError::DuplicateAxis { parameter });
        }
    }

    let config = &config.for_run();

    let span = tracing::info_span!("study", points = grid.len(), axes = axes.len());
    let _guard = span.enter();
    tracing::info!(%baseline, "computing baseline series");

    let baseline_series = sweep::sweep_series(model, grid, baseline, config, &mut observer)
        .map_err(|err| match err {
            sweep::Error::Cancelled => StudyError::Cancelled,
            err => StudyError::Baseline(err),
        })?;

    let mut sweeps = Vec::with_capacity(axes.len());
    for axis in axes {
        let parameter = axis.parameter();
        tracing::info!(%parameter, values = axis.values().len(), "sweeping axis");

        let axis_sweep = sweep::sweep_axis(model, grid, baseline, axis, config, &mut observer)
            .map_err(|err| match err {
                sweep::Error::Cancelled => StudyError::Cancelled,
                source => StudyError::Axis { parameter, source },
            })?;
        sweeps.push(axis_sweep);
    }

    tracing::info!("study complete");
    Ok(SweepResult::new(grid.clone(), baseline_series, sweeps))
}

/// Runs a study without observation.
///
/// Any failed axis value fails the study.
///
/// # Errors
///
/// See [`run_sensitivity_study`].
pub fn run_sensitivity_study_unobserved<M>(
    model: &M,
    grid: &RedshiftGrid,
    baseline: &ParameterSet,
    axes: &[ParameterAxis],
    config: &Config,
) -> Result<SweepResult, StudyError>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
{
    run_sensitivity_study(model, grid, baseline, axes, config, ())
}
