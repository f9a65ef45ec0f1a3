// SPDX-License-Identifier: MIT OR Apache-2.0
//! Events the host page forwards to the controller.

use serde::{Deserialize, Serialize};

/// Which control on a card was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// The play/pause control
    Play,
    /// The mute control
    Mute,
}

/// A playback-state notification from a video element itself.
///
/// These keep the control pressed flags authoritative even when playback
/// changes for reasons outside a click, such as autoplay settling or the
/// platform's own media controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaChange {
    /// Playback started
    Played,
    /// Playback paused
    Paused,
    /// Playback reached the end
    Ended,
    /// Volume or mute flag changed
    VolumeChanged,
}

/// One trigger from the host page.
///
/// All coordinates are relative to the track: `TrackTap::x` is measured
/// from the track's left edge, `Resized::viewport_width` is the window
/// width the breakpoint is classified from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CarouselEvent {
    /// A click on a card's play or mute control
    ControlClick {
        /// Display index of the clicked card
        card: usize,
        /// Which control was clicked
        control: ControlKind,
    },
    /// A click on the track outside any control
    TrackTap {
        /// Horizontal click position relative to the track's left edge
        x: f32,
    },
    /// A wheel event over the track
    Wheel {
        /// Horizontal wheel delta
        delta_x: f32,
        /// Vertical wheel delta
        delta_y: f32,
    },
    /// The track's scroll position settled
    Scrolled,
    /// The window was resized
    Resized {
        /// New window width
        viewport_width: f32,
    },
    /// The document was hidden or shown
    VisibilityChanged {
        /// Whether the document is now visible
        visible: bool,
    },
    /// A notification from one card's video element
    Media {
        /// Display index of the card whose video changed
        card: usize,
        /// What changed
        change: MediaChange,
    },
}

/// Whether the controller consumed an event.
///
/// `Consumed` means the host must suppress the event's default action; only
/// wheel paging ever needs that, so the page itself does not scroll while
/// the track pages card by card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event drove the carousel; suppress the default action
    Consumed,
    /// The event was not for the carousel; let it propagate
    Ignored,
}

impl Handled {
    /// Whether the host should suppress the default action
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
