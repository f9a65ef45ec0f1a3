// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host traits - the seam between the controller and the surrounding page.
//!
//! The page supplies fully-formed elements at mount; the controller never
//! creates or destroys them. It only reads state and geometry through these
//! traits and writes playback, mute, pressed-state, and scroll commands
//! back.

use filmstrip_layout::{CardExtent, ScrollBehavior, TrackMetrics};
use serde::{Deserialize, Serialize};

/// Media preload hint forwarded to the host's video element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreloadHint {
    /// Fetch nothing up front
    None,
    /// Fetch duration and dimensions only
    Metadata,
    /// Host decides, typically the full resource
    Auto,
}

/// A play request was refused by the hosting platform's autoplay policy
#[derive(Debug, thiserror::Error)]
#[error("play request rejected by the platform's autoplay policy")]
pub struct PlaybackRejected;

/// One playable media element owned by a card.
///
/// `request_play` is the only fallible operation in the system; the
/// coordinator treats a rejection as an acceptable terminal state, so
/// implementations should leave the element paused and report the error
/// rather than retrying.
pub trait VideoHandle {
    /// Whether the element is currently paused
    fn is_paused(&self) -> bool;

    /// Whether the element is currently muted
    fn is_muted(&self) -> bool;

    /// Set the mute flag, independent of playback state
    fn set_muted(&mut self, muted: bool);

    /// Allow inline playback instead of forced fullscreen
    fn set_plays_inline(&mut self, inline: bool);

    /// Show or hide the platform's native transport controls
    fn set_native_controls(&mut self, shown: bool);

    /// Set the preload hint
    fn set_preload(&mut self, hint: PreloadHint);

    /// Pause playback
    fn pause(&mut self);

    /// Ask the platform to start playback
    fn request_play(&mut self) -> Result<(), PlaybackRejected>;
}

/// A play or mute control element on a card
pub trait ControlHandle {
    /// Reflect the video's state in the control's pressed flag
    fn set_pressed(&mut self, pressed: bool);
}

/// The scrollable track holding all cards in one horizontal row
pub trait TrackHandle {
    /// Snapshot the track's current measurements
    fn metrics(&self) -> TrackMetrics;

    /// Snapshot every card's rendered position and width, in display order
    fn card_extents(&self) -> Vec<CardExtent>;

    /// Set the horizontal scroll offset
    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);
}
