use crate::cancel::CancelFlag;

/// How the redshifts of a single series are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Execution {
    /// One simulation call at a time, in grid order.
    #[default]
    Sequential,

    /// Redshifts evaluated concurrently on the rayon pool.
    ///
    /// Results are written back by grid index, and point events are emitted
    /// in grid order once the whole series is available.
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Configuration shared by every sweep entry point.
///
/// A config can be reused across runs. [`Action::StopEarly`](super::Action)
/// ends only the run whose observer returned it; cancelling the flag passed
/// to [`Config::with_cancel_flag`] stops every run that uses this config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    execution: Execution,
    cancel: CancelFlag,
}

impl Config {
    #[must_use]
    pub fn new(execution: Execution) -> Self {
        Self {
            execution,
            cancel: CancelFlag::new(),
        }
    }

    /// Uses `flag` to stop the sweep from elsewhere.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = flag;
        self
    }

    #[must_use]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    #[must_use]
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Returns a copy whose flag is a child of this config's flag.
    pub(crate) fn for_run(&self) -> Self {
        Self {
            execution: self.execution,
            cancel: self.cancel.child(),
        }
    }
}
