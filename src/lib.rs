//! A headless slot-recycling engine for long vertical lists.
//!
//! For gesture handling and fling animation, see the `recycler-adapter` crate.
//!
//! This crate covers the parts of a recycling list that contain actual algorithms:
//! a small pool of display slots rebound as content scrolls past the viewport edges,
//! variable-height stacking, content extent extrapolation, and a time-windowed velocity
//! estimator for drag release.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size (width/height)
//! - scroll deltas or absolute scroll offsets
//! - slot creation, binding and measurement via [`SlotHost`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod extent;
mod host;
mod options;
mod pool;
mod state;
mod types;
mod velocity;
mod window;


pub use extent::ContentExtentEstimator;
pub use host::SlotHost;
pub use options::{
    DEFAULT_EDGE_SAFETY_MARGIN, DEFAULT_SCROLL_OVERSCAN, Layout, RecyclePolicy, WindowOptions,
};
pub use pool::{Slot, SlotPool};
pub use state::WindowState;
pub use types::{Measurement, ScrollDirection, SlotId, SlotItem, WindowRange};
pub use velocity::{DEFAULT_MAX_AGE_MS, DEFAULT_SAMPLE_CAPACITY, VelocitySampler};
pub use window::WindowManager;
