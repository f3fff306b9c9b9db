//! Parameter sensitivity sweeps of the mean 21cm brightness temperature.
//!
//! The crate drives an external, deterministic simulation across a redshift
//! grid and across perturbations of three cosmological parameters, reduces
//! every simulated field to its mean, and hands back the resulting series for
//! comparison against a baseline.
//!
//! - [`reduce`] collapses one field to an [`Observable`].
//! - [`sweep`] evaluates a [`ParameterSet`] over a [`RedshiftGrid`], or every
//!   value of a [`ParameterAxis`].
//! - [`deviation`] compares a series to the baseline pointwise, in percent.
//! - [`run_sensitivity_study`] ties these together into a [`SweepResult`].
//! - [`report`] derives tables and endpoint summaries from a result.

mod cancel;
mod compare;
mod grid;
mod params;
mod reduce;
mod series;
mod study;

pub mod report;
pub mod simulation;
pub mod sweep;

pub use cancel::CancelFlag;
pub use compare::{CompareError, DeviationSeries, deviation, deviation_at};
pub use grid::{GridError, RedshiftGrid};
pub use params::{Parameter, ParameterAxis, ParameterError, ParameterSet};
pub use reduce::{Observable, ReductionError, reduce};
pub use series::Series;
pub use simulation::{SimulationInput, TimeLimited};
pub use study::{
    StudyError, StudyPlan, SweepResult, run_sensitivity_study, run_sensitivity_study_unobserved,
};
