// SPDX-License-Identifier: MIT OR Apache-2.0
//! Carousel aggregate and playback coordination.
//!
//! The coordinator enforces the central invariant: at most one video in the
//! carousel is playing at any instant. Every path that starts playback
//! pauses all other videos first, and every playback mutation ends by
//! resynchronizing the control pressed flags from the videos' actual state.

use crate::card::{Card, CardId};
use crate::host::TrackHandle;
use indexmap::IndexMap;
use std::fmt;

/// An ordered sequence of cards over one scroll track.
///
/// Insertion order is display order; a card's index is its position here.
pub struct Carousel {
    /// Cards in display order
    cards: IndexMap<CardId, Card>,
    /// The scroll container holding all cards
    track: Box<dyn TrackHandle>,
}

impl Carousel {
    /// Create an empty carousel over a track
    pub fn new(track: Box<dyn TrackHandle>) -> Self {
        Self {
            cards: IndexMap::new(),
            track,
        }
    }

    /// Append a card at the end of the display order
    pub fn add_card(&mut self, card: Card) -> CardId {
        let id = card.id;
        self.cards.insert(id, card);
        id
    }

    /// Get a card by display index
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get_index(index).map(|(_, card)| card)
    }

    /// Get a mutable card by display index
    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_index_mut(index).map(|(_, card)| card)
    }

    /// Iterate the cards in display order
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Iterate the cards mutably in display order
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.values_mut()
    }

    /// Get the card count
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the carousel has no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Borrow the track handle
    pub fn track(&self) -> &dyn TrackHandle {
        self.track.as_ref()
    }

    /// Borrow the track handle mutably
    pub fn track_mut(&mut self) -> &mut dyn TrackHandle {
        self.track.as_mut()
    }

    /// Activate a card's video: pause every other video, then play this one.
    ///
    /// `force_mute` mutes the video first, which is what keeps the play
    /// request eligible under autoplay policies. A rejected play request is
    /// logged and discarded; the pressed flags are synced from whatever
    /// state the platform left behind.
    pub fn activate(&mut self, index: usize, force_mute: bool) {
        if index >= self.len() {
            return;
        }

        self.pause_others(index);

        if let Some(card) = self.card_mut(index) {
            if force_mute {
                card.video.set_muted(true);
            }
            if card.video.request_play().is_err() {
                tracing::debug!(index, "play request rejected, leaving video paused");
            }
        }

        self.sync_all_controls();
    }

    /// Toggle a card's playback: activate when paused, pause only it when
    /// playing. Other videos are untouched on the pause path.
    pub fn toggle_play(&mut self, index: usize, force_mute: bool) {
        let Some(card) = self.card_mut(index) else {
            return;
        };

        if !card.video.is_paused() {
            card.video.pause();
            card.sync_controls();
            return;
        }

        self.activate(index, force_mute);
    }

    /// Flip a card's mute flag, independent of playback state
    pub fn toggle_mute(&mut self, index: usize) {
        let Some(card) = self.card_mut(index) else {
            return;
        };
        let muted = card.video.is_muted();
        card.video.set_muted(!muted);
        card.sync_controls();
    }

    /// Pause every video in the carousel
    pub fn pause_all(&mut self) {
        for card in self.cards_mut() {
            if !card.video.is_paused() {
                card.video.pause();
            }
        }
        self.sync_all_controls();
    }

    /// Pause every video except the one at `index`
    pub fn pause_others(&mut self, index: usize) {
        for (other, card) in self.cards_mut().enumerate() {
            if other == index {
                continue;
            }
            if !card.video.is_paused() {
                card.video.pause();
            }
        }
    }

    /// Resync every card's control pressed flags from actual media state
    pub fn sync_all_controls(&mut self) {
        for card in self.cards_mut() {
            card.sync_controls();
        }
    }

    /// Number of videos currently playing
    pub fn playing_count(&self) -> usize {
        self.cards().filter(|card| !card.video.is_paused()).count()
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("cards", &self.cards.len())
            .field("playing", &self.playing_count())
            .finish_non_exhaustive()
    }
}
