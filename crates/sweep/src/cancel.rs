use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared flag that stops a sweep from issuing new simulation calls.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (a signal handler, a UI) while the sweep holds the other. Calls already in
/// flight when the flag is raised run to completion; their results are
/// discarded.
///
/// Each run watches a child of the caller's flag. Cancelling the caller's
/// flag stops every run that uses it, while a run stopped by its observer
/// only raises its own child.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    parent: Option<Box<CancelFlag>>,
}

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true if this flag or any flag it was derived from is raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.parent.as_ref().is_some_and(|parent| parent.is_cancelled())
    }

    /// Returns a fresh flag that also observes this one.
    pub(crate) fn child(&self) -> Self {
        Self {
            cancelled: Arc::default(),
            parent: Some(Box::new(self.clone())),
        }
    }
}
