// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host page for the simulation harness.
//!
//! Implements the controller's host traits over plain shared state: videos
//! that honor a configurable autoplay policy, pressed-state controls, and a
//! track whose geometry is derived from a uniform card width and gap. The
//! harness keeps its own handles into the state so it can report what the
//! controller did to the "page".

use filmstrip_controller::{
    Card, Carousel, ControlHandle, PlaybackRejected, PreloadHint, TrackHandle, VideoHandle,
};
use filmstrip_layout::{CardExtent, ScrollBehavior, TrackMetrics};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether the simulated platform grants play requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoplayPolicy {
    /// Every play request succeeds
    Allow,
    /// Every play request is rejected, as a strict autoplay policy would
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

struct SimVideo {
    state: Rc<RefCell<VideoState>>,
}

impl VideoHandle for SimVideo {
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
            tracing::debug!("simulated platform rejected the play request");
            return Err(PlaybackRejected);
        }
        state.paused = false;
        Ok(())
    }
}

struct SimControl {
    pressed: Rc<RefCell<Option<bool>>>,
}

impl ControlHandle for SimControl {
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
}

impl TrackState {
    fn content_width(&self) -> f32 {
        if self.card_count == 0 {
            return 0.0;
        }
        self.card_count as f32 * self.card_width + (self.card_count - 1) as f32 * self.gap
    }
}

struct SimTrack {
    state: Rc<RefCell<TrackState>>,
}

impl TrackHandle for SimTrack {
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
        tracing::debug!(offset, ?behavior, "track scrolled");
        state.scroll_left = offset;
    }
}

/// The harness's view into the simulated page
pub struct SimPage {
    videos: Vec<Rc<RefCell<VideoState>>>,
    play_buttons: Vec<Rc<RefCell<Option<bool>>>>,
    mute_buttons: Vec<Rc<RefCell<Option<bool>>>>,
    track: Rc<RefCell<TrackState>>,
}

impl SimPage {
    /// Build a page with `count` uniform cards and the carousel over it
    pub fn build(
        count: usize,
        track_width: f32,
        card_width: f32,
        gap: f32,
        policy: AutoplayPolicy,
    ) -> (Self, Carousel) {
        let track = Rc::new(RefCell::new(TrackState {
            scroll_left: 0.0,
            viewport_width: track_width,
            card_width,
            gap,
            card_count: count,
        }));
        let mut carousel = Carousel::new(Box::new(SimTrack {
            state: Rc::clone(&track),
        }));

        let mut page = Self {
            videos: Vec::new(),
            play_buttons: Vec::new(),
            mute_buttons: Vec::new(),
            track,
        };
        for _ in 0..count {
            let video = Rc::new(RefCell::new(VideoState {
                paused: true,
                muted: false,
                plays_inline: false,
                native_controls: true,
                preload: PreloadHint::Auto,
                policy,
            }));
            let play = Rc::new(RefCell::new(None));
            let mute = Rc::new(RefCell::new(None));
            carousel.add_card(
                Card::new(Box::new(SimVideo {
                    state: Rc::clone(&video),
                }))
                .with_play_control(Box::new(SimControl {
                    pressed: Rc::clone(&play),
                }))
                .with_mute_control(Box::new(SimControl {
                    pressed: Rc::clone(&mute),
                })),
            );
            page.videos.push(video);
            page.play_buttons.push(play);
            page.mute_buttons.push(mute);
        }
        (page, carousel)
    }

    /// Indices of videos currently playing
    pub fn playing(&self) -> Vec<usize> {
        self.videos
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.borrow().paused)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of videos currently muted
    pub fn muted(&self) -> Vec<usize> {
        self.videos
            .iter()
            .enumerate()
            .filter(|(_, v)| v.borrow().muted)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pressed state of each play button, `None` where never written
    pub fn play_pressed(&self) -> Vec<Option<bool>> {
        self.play_buttons.iter().map(|b| *b.borrow()).collect()
    }

    /// Pressed state of each mute button, `None` where never written
    pub fn mute_pressed(&self) -> Vec<Option<bool>> {
        self.mute_buttons.iter().map(|b| *b.borrow()).collect()
    }

    /// Current track scroll offset
    pub fn scroll_left(&self) -> f32 {
        self.track.borrow().scroll_left
    }
}
