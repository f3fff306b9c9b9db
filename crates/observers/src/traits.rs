//! Capability traits for sweep observers.
//!
//! These traits abstract over event and action types so an observer can be
//! written once and reused.
//!
//! # Event traits
//!
//! - [`HasObservable`]: events that may carry a brightness temperature
//! - [`HasFailure`]: events that may report a failed axis value
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can cancel the sweep
//! - [`CanSkip`]: actions that can skip a failed axis value
//!
//! # Example
//!
//! ```rust
//! use tbsweep_core::Observer;
//! use tbsweep_observers::traits::{CanStopEarly, HasObservable};
//!
//! /// Stops once any point drops below a floor.
//! struct Floor(f64);
//!
//! impl<E: HasObservable, A: CanStopEarly> Observer<E, A> for Floor {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.millikelvin() < self.0).then(A::stop_early)
//!     }
//! }
//! ```

use tbsweep::sweep::{Action, Event};

/// An event that may carry a brightness temperature.
pub trait HasObservable {
    /// Returns the observable for this event, in mK.
    ///
    /// Returns `f64::NAN` when the event carries no single observable.
    fn millikelvin(&self) -> f64;
}

/// An event that may report a failure.
pub trait HasFailure {
    /// Returns true if the event reports a failed axis value.
    fn is_failure(&self) -> bool;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that cancels the sweep.
    fn stop_early() -> Self;
}

/// An action type that can skip a failed axis value.
pub trait CanSkip {
    /// Returns the action that skips the failed value and continues.
    fn skip() -> Self;
}

impl HasObservable for Event<'_> {
    fn millikelvin(&self) -> f64 {
        match self {
            Event::PointEvaluated { observable, .. } => observable.millikelvin(),
            Event::SeriesCompleted { .. } | Event::ValueFailed { .. } => f64::NAN,
        }
    }
}

impl HasFailure for Event<'_> {
    fn is_failure(&self) -> bool {
        matches!(self, Event::ValueFailed { .. })
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanSkip for Action {
    fn skip() -> Self {
        Self::Skip
    }
}
