// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mock host handles for tests.
//!
//! The rig stands in for the surrounding page: shared-state video, control,
//! and track handles with a configurable autoplay policy and mutable
//! geometry, so tests can both drive the controller and inspect what it did
//! to the "page".

use crate::card::Card;
use crate::carousel::Carousel;
use crate::host::{ControlHandle, PlaybackRejected, PreloadHint, TrackHandle, VideoHandle};
use filmstrip_layout::{CardExtent, ScrollBehavior, TrackMetrics};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether the fake platform grants play requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutoplayPolicy {
    Allow,
    Block,
}

#[derive(Debug)]
struct VideoState {
    paused: bool,
    muted: bool,
    plays_inline: bool,
    native_controls: bool,
    preload: PreloadHint,
    policy: AutoplayPolicy,
}

impl VideoState {
    fn new() -> Self {
        Self {
            paused: true,
            muted: false,
            plays_inline: false,
            native_controls: true,
            preload: PreloadHint::Auto,
            policy: AutoplayPolicy::Allow,
        }
    }
}

struct MockVideo {
    state: Rc<RefCell<VideoState>>,
}

impl VideoHandle for MockVideo {
    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn is_muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn set_plays_inline(&mut self, inline: bool) {
        self.state.borrow_mut().plays_inline = inline;
    }

    fn set_native_controls(&mut self, shown: bool) {
        self.state.borrow_mut().native_controls = shown;
    }

    fn set_preload(&mut self, hint: PreloadHint) {
        self.state.borrow_mut().preload = hint;
    }

    fn pause(&mut self) {
        self.state.borrow_mut().paused = true;
    }

    fn request_play(&mut self) -> Result<(), PlaybackRejected> {
        let mut state = self.state.borrow_mut();
        if state.policy == AutoplayPolicy::Block {
            return Err(PlaybackRejected);
        }
        state.paused = false;
        Ok(())
    }
}

struct MockControl {
    // None until the controller first writes a pressed state.
    pressed: Rc<RefCell<Option<bool>>>,
}

impl ControlHandle for MockControl {
    fn set_pressed(&mut self, pressed: bool) {
        *self.pressed.borrow_mut() = Some(pressed);
    }
}

#[derive(Debug)]
struct TrackState {
    scroll_left: f32,
    viewport_width: f32,
    card_width: f32,
    gap: f32,
    card_count: usize,
    last_behavior: Option<ScrollBehavior>,
}

impl TrackState {
    fn content_width(&self) -> f32 {
        if self.card_count == 0 {
            return 0.0;
        }
        self.card_count as f32 * self.card_width + (self.card_count - 1) as f32 * self.gap
    }
}

struct MockTrack {
    state: Rc<RefCell<TrackState>>,
}

impl TrackHandle for MockTrack {
    fn metrics(&self) -> TrackMetrics {
        let state = self.state.borrow();
        TrackMetrics {
            scroll_left: state.scroll_left,
            viewport_width: state.viewport_width,
            content_width: state.content_width(),
            gap: state.gap,
        }
    }

    fn card_extents(&self) -> Vec<CardExtent> {
        let state = self.state.borrow();
        (0..state.card_count)
            .map(|i| CardExtent {
                left: i as f32 * (state.card_width + state.gap),
                width: state.card_width,
            })
            .collect()
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let mut state = self.state.borrow_mut();
        state.scroll_left = offset;
        state.last_behavior = Some(behavior);
    }
}

/// Handles into the fake page, paired with the carousel built over it
pub(crate) struct CarouselRig {
    videos: Vec<Rc<RefCell<VideoState>>>,
    play_buttons: Vec<Rc<RefCell<Option<bool>>>>,
    mute_buttons: Vec<Rc<RefCell<Option<bool>>>>,
    track: Rc<RefCell<TrackState>>,
}

impl CarouselRig {
    /// Three-cards-in-view track: 300-wide cards, 20 gaps, 940 viewport
    pub fn new(count: usize) -> (Self, Carousel) {
        Self::with_track(count, 940.0, 300.0, 20.0)
    }

    pub fn with_track(
        count: usize,
        viewport_width: f32,
        card_width: f32,
        gap: f32,
    ) -> (Self, Carousel) {
        let track = Rc::new(RefCell::new(TrackState {
            scroll_left: 0.0,
            viewport_width,
            card_width,
            gap,
            card_count: count,
            last_behavior: None,
        }));
        let mut carousel = Carousel::new(Box::new(MockTrack {
            state: Rc::clone(&track),
        }));

        let mut rig = Self {
            videos: Vec::new(),
            play_buttons: Vec::new(),
            mute_buttons: Vec::new(),
            track,
        };
        for _ in 0..count {
            let video = Rc::new(RefCell::new(VideoState::new()));
            let play = Rc::new(RefCell::new(None));
            let mute = Rc::new(RefCell::new(None));
            carousel.add_card(
                Card::new(Box::new(MockVideo {
                    state: Rc::clone(&video),
                }))
                .with_play_control(Box::new(MockControl {
                    pressed: Rc::clone(&play),
                }))
                .with_mute_control(Box::new(MockControl {
                    pressed: Rc::clone(&mute),
                })),
            );
            rig.videos.push(video);
            rig.play_buttons.push(play);
            rig.mute_buttons.push(mute);
        }
        (rig, carousel)
    }

    pub fn is_playing(&self, index: usize) -> bool {
        !self.videos[index].borrow().paused
    }

    pub fn is_muted(&self, index: usize) -> bool {
        self.videos[index].borrow().muted
    }

    pub fn plays_inline(&self, index: usize) -> bool {
        self.videos[index].borrow().plays_inline
    }

    pub fn native_controls(&self, index: usize) -> bool {
        self.videos[index].borrow().native_controls
    }

    pub fn preload(&self, index: usize) -> PreloadHint {
        self.videos[index].borrow().preload
    }

    pub fn play_pressed(&self, index: usize) -> Option<bool> {
        *self.play_buttons[index].borrow()
    }

    pub fn mute_pressed(&self, index: usize) -> Option<bool> {
        *self.mute_buttons[index].borrow()
    }

    pub fn block_autoplay(&self, index: usize) {
        self.videos[index].borrow_mut().policy = AutoplayPolicy::Block;
    }

    /// Start playback behind the coordinator's back, as the platform can
    pub fn force_playing(&self, index: usize) {
        self.videos[index].borrow_mut().paused = false;
    }

    pub fn force_paused(&self, index: usize) {
        self.videos[index].borrow_mut().paused = true;
    }

    pub fn set_muted(&self, index: usize, muted: bool) {
        self.videos[index].borrow_mut().muted = muted;
    }

    pub fn scroll_left(&self) -> f32 {
        self.track.borrow().scroll_left
    }

    pub fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.track.borrow().last_behavior
    }

    pub fn set_scroll(&self, offset: f32) {
        self.track.borrow_mut().scroll_left = offset;
    }

    pub fn set_card_width(&self, width: f32) {
        self.track.borrow_mut().card_width = width;
    }

    /// First visible index per the track's current step width
    pub fn first_visible(&self) -> usize {
        let state = self.track.borrow();
        let step = state.card_width + state.gap;
        if step <= 0.0 {
            return 0;
        }
        (state.scroll_left / step).round().max(0.0) as usize
    }
}
