/// Control actions an observer can return during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop issuing simulation calls and fail the run with
    /// [`Error::Cancelled`](super::Error::Cancelled).
    StopEarly,

    /// Record a failed axis value as skipped and continue with the next one.
    ///
    /// Only meaningful in response to [`Event::ValueFailed`](super::Event::ValueFailed);
    /// ignored for every other event.
    Skip,
}
