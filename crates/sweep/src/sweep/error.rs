use std::error::Error as StdError;

use thiserror::Error;

use crate::{params::ParameterSet, reduce::ReductionError};

/// Errors that can occur while sweeping.
///
/// Point failures carry the parameter set, redshift and grid index of the
/// evaluation that failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("simulation failed for {parameters} at z = {redshift} (grid index {index})")]
    Simulation {
        parameters: ParameterSet,
        redshift: f64,
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("could not reduce the field for {parameters} at z = {redshift} (grid index {index})")]
    Reduction {
        parameters: ParameterSet,
        redshift: f64,
        index: usize,
        #[source]
        source: ReductionError,
    },

    #[error("sweep cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn simulation<E: StdError + Send + Sync + 'static>(
        parameters: ParameterSet,
        redshift: f64,
        index: usize,
        err: E,
    ) -> Self {
        Self::Simulation {
            parameters,
            redshift,
            index,
            source: Box::new(err),
        }
    }

    /// Returns the redshift of the failed evaluation, if one was attempted.
    #[must_use]
    pub fn redshift(&self) -> Option<f64> {
        match self {
            Self::Simulation { redshift, .. } | Self::Reduction { redshift, .. } => Some(*redshift),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Renders an error and its sources as one line.
pub(crate) fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
