use tbsweep_core::Model;

#[cfg(feature = "parallel")]
use crate::{cancel::CancelFlag, grid::RedshiftGrid};
use crate::{
    params::ParameterSet,
    reduce::{Observable, reduce},
    simulation::SimulationInput,
};

use super::Error;

/// Simulates one redshift and reduces the field.
pub(super) fn evaluate<M>(
    model: &M,
    parameters: &ParameterSet,
    index: usize,
    redshift: f64,
) -> Result<Observable, Error>
where
    M: Model<Input = SimulationInput>,
    M::Output: AsRef<[f64]>,
{
    let input = SimulationInput::new(redshift, *parameters);

    let field = model
        .call(&input)
        .map_err(|err| Error::simulation(*parameters, redshift, index, err))?;

    let observable = reduce(field.as_ref()).map_err(|source| Error::Reduction {
        parameters: *parameters,
        redshift,
        index,
        source,
    })?;

    tracing::trace!(%parameters, redshift, index, %observable, "point evaluated");
    Ok(observable)
}

/// Simulates every redshift of the grid on the rayon pool.
///
/// Results are collected by grid index. Rayon stops handing out new points
/// once one fails; which failure is reported when several points fail
/// concurrently is unspecified.
#[cfg(feature = "parallel")]
pub(super) fn evaluate_parallel<M>(
    model: &M,
    grid: &RedshiftGrid,
    parameters: &ParameterSet,
    cancel: &CancelFlag,
) -> Result<Vec<Observable>, Error>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
{
    use rayon::prelude::*;

    grid.as_slice()
        .par_iter()
        .enumerate()
        .map(|(index, &redshift)| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            evaluate(model, parameters, index, redshift)
        })
        .collect()
}
