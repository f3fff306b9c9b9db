use tbsweep_core::Observer;

use crate::traits::{CanSkip, CanStopEarly, HasFailure};

/// Skips failed axis values instead of failing the sweep.
///
/// Wraps another observer, which sees every event first. If the inner
/// observer returns an action it wins; otherwise a failure event is answered
/// with a skip. With a limit set, the failure after the last allowed skip
/// stops the sweep early instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipFailures<O = ()> {
    inner: O,
    limit: Option<usize>,
    skipped: usize,
}

impl SkipFailures {
    /// Skips every failed value.
    #[must_use]
    pub fn new() -> Self {
        Self::wrap(())
    }
}

impl<O> SkipFailures<O> {
    /// Wraps `inner`, skipping every failed value it does not handle.
    #[must_use]
    pub fn wrap(inner: O) -> Self {
        Self {
            inner,
            limit: None,
            skipped: 0,
        }
    }

    /// Allows at most `limit` skips before stopping the sweep.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the number of values skipped so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<E, A, O> Observer<E, A> for SkipFailures<O>
where
    E: HasFailure,
    A: CanSkip + CanStopEarly,
    O: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let action = self.inner.observe(event);
        if action.is_some() || !event.is_failure() {
            return action;
        }

        if self.limit.is_some_and(|limit| self.skipped >= limit) {
            return Some(A::stop_early());
        }

        self.skipped += 1;
        Some(A::skip())
    }
}
