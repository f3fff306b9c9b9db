use crate::{
    params::{Parameter, ParameterSet},
    reduce::Observable,
    series::Series,
};

use super::Error;

/// Events emitted while sweeping.
#[derive(Debug)]
pub enum Event<'a> {
    /// One redshift of a series was simulated and reduced.
    PointEvaluated {
        /// The parameter set of the series being built.
        parameters: &'a ParameterSet,

        /// Grid index of the point.
        index: usize,

        /// Redshift of the point.
        redshift: f64,

        /// The reduced observable.
        observable: Observable,
    },

    /// Every redshift of a series was evaluated.
    SeriesCompleted { series: &'a Series },

    /// The series for an axis value could not be built.
    ///
    /// Observers decide what happens next: [`Action::Skip`](super::Action::Skip)
    /// continues with the next value, [`Action::StopEarly`](super::Action::StopEarly)
    /// cancels, and no action fails the axis sweep with `error`.
    ValueFailed {
        parameter: Parameter,
        value: f64,
        error: &'a Error,
    },
}
