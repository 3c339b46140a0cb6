//! Adapter utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on the windowing math and state. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A drag/fling state machine that feeds gesture samples into a window
//! - Tween and easing helpers used to decay a fling (adapter-driven; call `tick` per frame)
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod tween;


pub use controller::{
    DEFAULT_FLING_DURATION_MS, FlingController, FlingOptions, GestureEvent, GestureState,
};
pub use tween::{Easing, Tween};
