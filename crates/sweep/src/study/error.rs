use thiserror::Error;

use crate::{params::Parameter, sweep};

/// Errors that can occur while running a sensitivity study.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("more than one axis varies {parameter}")]
    DuplicateAxis { parameter: Parameter },

    #[error("baseline series failed")]
    Baseline(#[source] sweep::Error),

    #[error("{parameter} axis failed")]
    Axis {
        parameter: Parameter,
        #[source]
        source: sweep::Error,
    },

    #[error("study cancelled")]
    Cancelled,
}
