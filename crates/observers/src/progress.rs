use tbsweep::{
    Observable,
    sweep::{Action, Event},
};
use tbsweep_core::Observer;

/// Logs sweep progress as structured `tracing` events.
///
/// Every `stride`-th point of a series is logged at `info`, along with each
/// completed series. Failed axis values are logged at `warn`. The observer
/// never returns an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingObserver {
    stride: usize,
    points: usize,
    series: usize,
}

impl TracingObserver {
    /// Logs every tenth redshift.
    #[must_use]
    pub fn new() -> Self {
        Self::with_stride(10)
    }

    /// Logs every `stride`-th redshift of each series.
    ///
    /// A stride of zero is treated as one.
    #[must_use]
    pub fn with_stride(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            points: 0,
            series: 0,
        }
    }

    /// Returns the number of points seen so far.
    #[must_use]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Returns the number of completed series seen so far.
    #[must_use]
    pub fn series(&self) -> usize {
        self.series
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer<Event<'_>, Action> for TracingObserver {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        match event {
            Event::PointEvaluated {
                parameters,
                index,
                redshift,
                observable,
            } => {
                self.points += 1;
                if index % self.stride == 0 {
                    tracing::info!(
                        %parameters,
                        index,
                        redshift,
                        millikelvin = observable.millikelvin(),
                        "point evaluated"
                    );
                }
            }
            Event::SeriesCompleted { series } => {
                self.series += 1;
                tracing::info!(
                    parameters = %series.parameters(),
                    points = series.len(),
                    last = ?series.last().map(Observable::millikelvin),
                    "series complete"
                );
            }
            Event::ValueFailed {
                parameter,
                value,
                error,
            } => {
                tracing::warn!(%parameter, value, %error, "axis value failed");
            }
        }
        None
    }
}
