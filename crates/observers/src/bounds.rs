use tbsweep_core::Observer;

use crate::traits::{CanStopEarly, HasObservable};

/// Stops the sweep once an observable leaves a plausible range.
///
/// Events without an observable are ignored. The first out-of-range value is
/// kept so the caller can report it after the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsGuard {
    min: f64,
    max: f64,
    tripped: Option<f64>,
}

impl BoundsGuard {
    /// Accepts observables in `min..=max`, in mK.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            tripped: None,
        }
    }

    /// Returns the first observable that fell outside the range, if any.
    #[must_use]
    pub fn tripped(&self) -> Option<f64> {
        self.tripped
    }
}

impl<E: HasObservable, A: CanStopEarly> Observer<E, A> for BoundsGuard {
    fn observe(&mut self, event: &E) -> Option<A> {
        let value = event.millikelvin();
        if value.is_nan() || (self.min..=self.max).contains(&value) {
            return None;
        }

        self.tripped.get_or_insert(value);
        Some(A::stop_early())
    }
}
