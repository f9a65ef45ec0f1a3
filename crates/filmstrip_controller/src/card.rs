// SPDX-License-Identifier: MIT OR Apache-2.0
//! Card definitions for the carousel.

use crate::host::{ControlHandle, VideoHandle};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Create a new random card ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

/// One visual unit in the carousel: a video plus optional controls.
///
/// The card's position in the carousel is its display index; the id only
/// names it across log lines and reports.
pub struct Card {
    /// Unique card ID
    pub id: CardId,
    /// The card's owned video element
    pub video: Box<dyn VideoHandle>,
    /// Play/pause control, if the card has one
    pub play_control: Option<Box<dyn ControlHandle>>,
    /// Mute control, if the card has one
    pub mute_control: Option<Box<dyn ControlHandle>>,
}

impl Card {
    /// Create a card around its video element
    pub fn new(video: Box<dyn VideoHandle>) -> Self {
        Self {
            id: CardId::new(),
            video,
            play_control: None,
            mute_control: None,
        }
    }

    /// Attach a play control
    pub fn with_play_control(mut self, control: Box<dyn ControlHandle>) -> Self {
        self.play_control = Some(control);
        self
    }

    /// Attach a mute control
    pub fn with_mute_control(mut self, control: Box<dyn ControlHandle>) -> Self {
        self.mute_control = Some(control);
        self
    }

    /// Push the video's actual state into the control pressed flags.
    ///
    /// Always reads back from the video rather than trusting the caller's
    /// intent: a rejected play request leaves the video paused, and the
    /// buttons must say so.
    pub fn sync_controls(&mut self) {
        let paused = self.video.is_paused();
        let muted = self.video.is_muted();
        if let Some(control) = self.play_control.as_mut() {
            control.set_pressed(!paused);
        }
        if let Some(control) = self.mute_control.as_mut() {
            control.set_pressed(muted);
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("paused", &self.video.is_paused())
            .field("muted", &self.video.is_muted())
            .finish_non_exhaustive()
    }
}
