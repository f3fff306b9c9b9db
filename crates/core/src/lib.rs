//! Core traits for the brightness-temperature sensitivity sweep.
//!
//! This crate defines the shared abstractions the sweep engine and its
//! observers build on:
//!
//! - [`Model`]: a deterministic callable mapping a typed input to a typed output
//! - [`Observer`]: receives engine events and optionally returns control actions

mod model;
mod observer;

pub use model::Model;
pub use observer::Observer;
