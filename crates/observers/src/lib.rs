//! Reusable observers for sensitivity sweeps.
//!
//! This crate provides [`Observer`] implementations for the events emitted by
//! [`tbsweep::sweep`], plus capability traits that let the generic ones work
//! with any event and action types that opt in.
//!
//! # Modules
//!
//! - [`traits`]: capability traits ([`HasObservable`], [`HasFailure`],
//!   [`CanStopEarly`], [`CanSkip`])
//! - [`TracingObserver`]: structured progress logging through `tracing`
//! - [`SkipFailures`]: skip failed axis values, optionally up to a limit
//! - [`BoundsGuard`]: stop once an observable leaves a plausible range
//!
//! [`Observer`]: tbsweep_core::Observer
//! [`HasObservable`]: traits::HasObservable
//! [`HasFailure`]: traits::HasFailure
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanSkip`]: traits::CanSkip

pub mod traits;

mod bounds;
mod policy;
mod progress;

pub use bounds::BoundsGuard;
pub use policy::SkipFailures;
pub use progress::TracingObserver;
