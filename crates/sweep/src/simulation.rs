//! The boundary between the sweep and the external simulation.
//!
//! The simulation is any [`Model`](tbsweep_core::Model) taking a [`SimulationInput`] and returning a
//! field that can be viewed as a flat slice of brightness temperatures (mK).
//! It is treated as an expensive, deterministic oracle: the sweep never looks
//! inside it, and relies on it to reject parameter combinations it cannot
//! simulate with its own error type.
//!
//! [`TimeLimited`] wraps a simulation so every call is bounded by a
//! caller-supplied duration.

mod time_limited;

pub use time_limited::{TimeLimitError, TimeLimited};

use crate::params::ParameterSet;

/// The input to one simulation call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationInput {
    pub redshift: f64,
    pub parameters: ParameterSet,
}

impl SimulationInput {
    #[must_use]
    pub fn new(redshift: f64, parameters: ParameterSet) -> Self {
        Self {
            redshift,
            parameters,
        }
    }
}
