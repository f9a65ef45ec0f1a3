// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout math for the Filmstrip carousel.
//!
//! This crate provides the pure geometry underneath the carousel behavior:
//! - Viewport breakpoint classification
//! - Card and track measurements
//! - The centered-card locator
//! - Clamped scroll targets
//!
//! ## Architecture
//!
//! Everything here is a pure function over measured values. The crate never
//! touches the host page; callers snapshot the track (`TrackMetrics`, a list
//! of `CardExtent`s) and feed the snapshot in. A layout that has not settled
//! yet (zero step width) makes every index query return `None` so callers
//! can defer instead of acting on stale geometry.

pub mod breakpoint;
pub mod geometry;
pub mod scroll;

pub use breakpoint::{Breakpoint, ConfigError, Thresholds};
pub use geometry::{
    centered_index, first_visible_index, step_width, visible_range, CardExtent, TrackMetrics,
    VisibleRange,
};
pub use scroll::{scroll_target, ScrollBehavior};
