// SPDX-License-Identifier: MIT OR Apache-2.0
//! The carousel controller - interaction routing and lifecycle resync.
//!
//! This module handles:
//! - Mounting: priming videos and placing the initial card
//! - Breakpoint-dependent click, tap, and wheel routing
//! - Resize, scroll, and visibility resync
//! - Media notifications from the videos themselves
//!
//! Geometry reads that follow a layout-affecting operation (mount, resize)
//! are deferred to the host's next [`CarouselController::settle`] call, one
//! deferred tick after layout. An unmeasurable layout leaves the pending
//! resync in place for the following tick.

use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::event::{CarouselEvent, ControlKind, Handled, MediaChange};
use crate::host::PreloadHint;
use filmstrip_layout::{
    geometry, scroll, Breakpoint, CardExtent, ConfigError, ScrollBehavior, TrackMetrics,
    VisibleRange,
};

/// Work queued for the next settle tick
#[derive(Debug, Clone, Copy)]
enum Resync {
    /// Center and activate a known card (initial placement)
    InitialCard(usize),
    /// Re-derive the centered card, then center and activate it
    Recenter,
}

/// Owns the carousel behavior: active-card selection, single-playback
/// coordination, and event wiring to the surrounding page.
///
/// The controller re-derives its view of the world (breakpoint, centered
/// card) from the latest snapshot on every event instead of caching it, so
/// derived state can never drift from the actual page.
#[derive(Debug)]
pub struct CarouselController {
    config: CarouselConfig,
    carousel: Carousel,
    viewport_width: f32,
    pending: Option<Resync>,
}

impl CarouselController {
    /// Create a controller over a fully-formed carousel
    pub fn new(carousel: Carousel, config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            carousel,
            viewport_width: 0.0,
            pending: None,
        })
    }

    /// Borrow the carousel
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Borrow the carousel mutably
    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Current breakpoint for the last known viewport width
    pub fn breakpoint(&self) -> Breakpoint {
        self.config.thresholds.classify(self.viewport_width)
    }

    /// Wire up the carousel at document-ready.
    ///
    /// Primes every video for autoplay eligibility, positions the track at
    /// the initial card, and queues that card's activation for the next
    /// [`settle`](Self::settle) tick, once layout has produced real
    /// geometry.
    pub fn mount(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
        if self.carousel.is_empty() {
            return;
        }

        self.prime_videos();
        let index = self.initial_index();
        self.scroll_to_card(index, ScrollBehavior::Instant);
        self.pending = Some(Resync::InitialCard(index));
        tracing::info!(
            breakpoint = self.breakpoint().name(),
            index,
            "carousel mounted"
        );
    }

    /// Run any pending resync, one tick after a layout-affecting operation.
    ///
    /// The host calls this once after its next layout pass following
    /// [`mount`](Self::mount) or a resize. If the track is still
    /// unmeasurable the pending work stays queued for the next call.
    pub fn settle(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let index = match pending {
            Resync::InitialCard(index) if self.measurable() => index,
            Resync::Recenter => match self.centered_card() {
                Some(index) => index,
                None => {
                    self.pending = Some(pending);
                    return;
                }
            },
            Resync::InitialCard(_) => {
                self.pending = Some(pending);
                return;
            }
        };

        self.scroll_to_card(index, ScrollBehavior::Instant);
        self.carousel.activate(index, self.config.mute_on_activate);
    }

    /// Route one event from the host page.
    ///
    /// Returns [`Handled::Consumed`] when the host must suppress the
    /// event's default action; only desktop wheel paging does.
    pub fn handle(&mut self, event: CarouselEvent) -> Handled {
        match event {
            CarouselEvent::ControlClick { card, control } => {
                self.on_control_click(card, control);
                Handled::Ignored
            }
            CarouselEvent::TrackTap { x } => {
                self.on_track_tap(x);
                Handled::Ignored
            }
            CarouselEvent::Wheel { delta_x, delta_y } => self.on_wheel(delta_x, delta_y),
            CarouselEvent::Scrolled => {
                self.on_scrolled();
                Handled::Ignored
            }
            CarouselEvent::Resized { viewport_width } => {
                self.on_resized(viewport_width);
                Handled::Ignored
            }
            CarouselEvent::VisibilityChanged { visible } => {
                self.on_visibility_changed(visible);
                Handled::Ignored
            }
            CarouselEvent::Media { card, change } => {
                self.on_media(card, change);
                Handled::Ignored
            }
        }
    }

    /// Play/mute click: toggle the media, then nudge the window when the
    /// clicked card sits at an edge of it (wide breakpoints only).
    fn on_control_click(&mut self, card: usize, control: ControlKind) {
        let breakpoint = self.breakpoint();
        match control {
            ControlKind::Play => self
                .carousel
                .toggle_play(card, self.config.mute_on_activate),
            ControlKind::Mute => self.carousel.toggle_mute(card),
        }

        if breakpoint == Breakpoint::Single {
            // The button only controls media on the single-card breakpoint.
            return;
        }
        if self.carousel.len() <= breakpoint.cards_in_view() {
            return;
        }
        let Some(range) = self.visible_window() else {
            return;
        };

        if card == range.last && range.last < self.carousel.len() - 1 {
            tracing::debug!(card, "right-edge click, nudging window right");
            self.scroll_to_card(range.last + 1, ScrollBehavior::Smooth);
        } else if card == range.first && range.first > 0 {
            tracing::debug!(card, "left-edge click, nudging window left");
            self.scroll_to_card(range.first - 1, ScrollBehavior::Smooth);
        }
    }

    /// Side-peek tap: advance one card toward the tapped half and continue
    /// autoplay there. Single-card breakpoint only.
    fn on_track_tap(&mut self, x: f32) {
        if self.breakpoint() != Breakpoint::Single {
            return;
        }
        let (metrics, extents) = self.snapshot();
        let Some(range) = geometry::visible_range(&metrics, &extents, 1) else {
            return;
        };

        let go_right = x > metrics.viewport_width / 2.0;
        let target = if go_right {
            (range.last + 1).min(self.carousel.len().saturating_sub(1))
        } else {
            range.first.saturating_sub(1)
        };

        tracing::debug!(target, go_right, "side-peek tap");
        self.scroll_to_card(target, ScrollBehavior::Smooth);
        self.carousel.activate(target, self.config.mute_on_activate);
    }

    /// Wheel paging: vertical-dominant deltas step the window one card per
    /// event on desktop, consuming the event so the page does not scroll.
    fn on_wheel(&mut self, delta_x: f32, delta_y: f32) -> Handled {
        if self.breakpoint() != Breakpoint::Desktop {
            return Handled::Ignored;
        }
        if delta_y.abs() <= delta_x.abs() {
            return Handled::Ignored;
        }
        let Some(range) = self.visible_window() else {
            return Handled::Ignored;
        };

        let target = if delta_y > 0.0 {
            (range.last + 1).min(self.carousel.len().saturating_sub(1))
        } else {
            range.first.saturating_sub(1)
        };
        self.scroll_to_card(target, ScrollBehavior::Smooth);
        Handled::Consumed
    }

    /// A settled scroll re-derives the active card when configured to.
    fn on_scrolled(&mut self) {
        if !self.config.autoplay_follows_scroll {
            return;
        }
        if let Some(index) = self.centered_card() {
            self.carousel.activate(index, self.config.mute_on_activate);
        }
    }

    /// Reclassify the breakpoint and queue a recenter for the next tick.
    fn on_resized(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
        self.pending = Some(Resync::Recenter);
        tracing::debug!(
            breakpoint = self.breakpoint().name(),
            viewport_width,
            "resized, recenter queued"
        );
    }

    /// Hidden: pause everything. Shown: re-derive and activate the
    /// centered card for the current breakpoint.
    fn on_visibility_changed(&mut self, visible: bool) {
        if !visible {
            self.carousel.pause_all();
            return;
        }
        if let Some(index) = self.centered_card() {
            self.carousel.activate(index, self.config.mute_on_activate);
        }
    }

    /// Keep pressed flags authoritative against playback changes that did
    /// not come from a click, and re-assert mutual exclusion when the
    /// platform starts playback on its own.
    fn on_media(&mut self, card: usize, change: MediaChange) {
        match change {
            MediaChange::Played => {
                self.carousel.pause_others(card);
                self.carousel.sync_all_controls();
            }
            MediaChange::Paused | MediaChange::Ended | MediaChange::VolumeChanged => {
                if let Some(card) = self.carousel.card_mut(card) {
                    card.sync_controls();
                }
            }
        }
    }

    /// Make every video eligible for autoplay before the first activation
    fn prime_videos(&mut self) {
        for card in self.carousel.cards_mut() {
            card.video.set_muted(true);
            card.video.set_plays_inline(true);
            card.video.set_native_controls(false);
            card.video.set_preload(PreloadHint::Metadata);
        }
    }

    /// Initial card: the middle of the first three on wide breakpoints,
    /// the first card otherwise
    fn initial_index(&self) -> usize {
        match self.breakpoint() {
            Breakpoint::Desktop | Breakpoint::Tablet if self.carousel.len() >= 3 => 1,
            _ => 0,
        }
    }

    fn snapshot(&self) -> (TrackMetrics, Vec<CardExtent>) {
        let track = self.carousel.track();
        (track.metrics(), track.card_extents())
    }

    fn measurable(&self) -> bool {
        let (metrics, extents) = self.snapshot();
        geometry::step_width(&metrics, &extents).is_some()
    }

    fn centered_card(&self) -> Option<usize> {
        let (metrics, extents) = self.snapshot();
        geometry::centered_index(&metrics, &extents)
    }

    fn visible_window(&self) -> Option<VisibleRange> {
        let (metrics, extents) = self.snapshot();
        geometry::visible_range(&metrics, &extents, self.breakpoint().cards_in_view())
    }

    fn scroll_to_card(&mut self, index: usize, behavior: ScrollBehavior) {
        let (metrics, extents) = self.snapshot();
        let Some(extent) = extents.get(index) else {
            return;
        };
        let target = scroll::scroll_target(&metrics, extent);
        self.carousel.track_mut().scroll_to(target, behavior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PreloadHint;
    use crate::mock::CarouselRig;

    const STEP: f32 = 320.0;

    fn desktop_controller(count: usize) -> (CarouselRig, CarouselController) {
        let (rig, carousel) = CarouselRig::new(count);
        let mut controller =
            CarouselController::new(carousel, CarouselConfig::default()).unwrap();
        controller.mount(1280.0);
        (rig, controller)
    }

    fn single_controller(count: usize) -> (CarouselRig, CarouselController) {
        let (rig, carousel) = CarouselRig::with_track(count, 340.0, 300.0, 20.0);
        let mut controller =
            CarouselController::new(carousel, CarouselConfig::default()).unwrap();
        controller.mount(400.0);
        (rig, controller)
    }

    #[test]
    fn test_mount_primes_and_activates_card_one_after_settle() {
        let (rig, mut controller) = desktop_controller(5);
        assert_eq!(controller.breakpoint(), Breakpoint::Desktop);

        // Priming happens at mount, activation only at the settle tick.
        assert_eq!(controller.carousel().playing_count(), 0);
        for i in 0..5 {
            assert!(rig.is_muted(i));
            assert!(rig.plays_inline(i));
            assert!(!rig.native_controls(i));
            assert_eq!(rig.preload(i), PreloadHint::Metadata);
        }

        controller.settle();
        assert!(rig.is_playing(1));
        assert_eq!(controller.carousel().playing_count(), 1);
        assert_eq!(rig.play_pressed(1), Some(true));
        // Card 1 centered: its scroll target is the track's left edge.
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_mount_on_single_breakpoint_starts_at_card_zero() {
        let (rig, mut controller) = single_controller(5);
        assert_eq!(controller.breakpoint(), Breakpoint::Single);
        controller.settle();
        assert!(rig.is_playing(0));
        assert_eq!(controller.carousel().playing_count(), 1);
    }

    #[test]
    fn test_mount_defers_activation_until_layout_is_measurable() {
        let (rig, carousel) = CarouselRig::with_track(5, 940.0, 0.0, 0.0);
        let mut controller =
            CarouselController::new(carousel, CarouselConfig::default()).unwrap();
        controller.mount(1280.0);

        controller.settle();
        assert_eq!(controller.carousel().playing_count(), 0);

        // Layout settles; the queued activation runs on the next tick.
        rig.set_card_width(300.0);
        controller.settle();
        assert!(rig.is_playing(1));
    }

    #[test]
    fn test_click_rightmost_visible_card_plays_it_and_advances_window() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        // Window is [0, 2]; card 2 is the right edge with cards beyond.
        controller.handle(CarouselEvent::ControlClick {
            card: 2,
            control: ControlKind::Play,
        });

        assert!(rig.is_playing(2));
        assert_eq!(controller.carousel().playing_count(), 1);
        assert!(rig.scroll_left() > 0.0);
        assert_eq!(rig.last_behavior(), Some(ScrollBehavior::Smooth));

        // The window advanced toward the right.
        let first = rig.first_visible();
        assert!(first >= 1);
    }

    #[test]
    fn test_click_mid_window_card_does_not_scroll() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        rig.set_scroll(STEP);

        // Window [1, 3]; card 2 is in the middle.
        controller.handle(CarouselEvent::ControlClick {
            card: 2,
            control: ControlKind::Play,
        });
        assert!(rig.is_playing(2));
        assert_eq!(rig.scroll_left(), STEP);
    }

    #[test]
    fn test_click_left_edge_nudges_window_left() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        rig.set_scroll(2.0 * STEP);

        // Window [2, 4]; card 2 is the left edge.
        controller.handle(CarouselEvent::ControlClick {
            card: 2,
            control: ControlKind::Play,
        });
        assert!(rig.is_playing(2));
        assert!(rig.scroll_left() < 2.0 * STEP);
    }

    #[test]
    fn test_mute_click_at_edge_also_nudges() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        controller.handle(CarouselEvent::ControlClick {
            card: 2,
            control: ControlKind::Mute,
        });
        // Mute toggled off (priming muted it), playback untouched, nudged.
        assert!(!rig.is_muted(2));
        assert!(rig.is_playing(1));
        assert!(rig.scroll_left() > 0.0);
    }

    #[test]
    fn test_no_nudge_when_all_cards_fit_the_window() {
        let (rig, mut controller) = desktop_controller(3);
        controller.settle();

        controller.handle(CarouselEvent::ControlClick {
            card: 2,
            control: ControlKind::Play,
        });
        assert!(rig.is_playing(2));
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_single_breakpoint_buttons_only_control_media() {
        let (rig, mut controller) = single_controller(5);
        controller.settle();
        assert!(rig.is_playing(0));
        let scroll = rig.scroll_left();

        controller.handle(CarouselEvent::ControlClick {
            card: 0,
            control: ControlKind::Play,
        });
        assert!(!rig.is_playing(0));
        assert_eq!(rig.scroll_left(), scroll);
    }

    #[test]
    fn test_side_peek_tap_advances_and_continues_autoplay_muted() {
        let (rig, mut controller) = single_controller(5);
        controller.settle();
        assert!(rig.is_playing(0));

        // Tap the right peek.
        controller.handle(CarouselEvent::TrackTap { x: 330.0 });
        assert!(rig.is_playing(1));
        assert!(rig.is_muted(1));
        assert!(!rig.is_playing(0));
        assert_eq!(rig.last_behavior(), Some(ScrollBehavior::Smooth));
        assert!(rig.scroll_left() > 0.0);

        // Tap the left peek to come back.
        controller.handle(CarouselEvent::TrackTap { x: 10.0 });
        assert!(rig.is_playing(0));
        assert!(!rig.is_playing(1));
    }

    #[test]
    fn test_track_tap_is_inert_on_wide_breakpoints() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        controller.handle(CarouselEvent::TrackTap { x: 900.0 });
        assert!(rig.is_playing(1));
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_wheel_pages_one_card_and_is_consumed_on_desktop() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        let handled = controller.handle(CarouselEvent::Wheel {
            delta_x: 0.0,
            delta_y: 5.0,
        });
        assert_eq!(handled, Handled::Consumed);
        assert!(rig.scroll_left() > 0.0);

        let scroll = rig.scroll_left();
        let handled = controller.handle(CarouselEvent::Wheel {
            delta_x: 0.0,
            delta_y: -5.0,
        });
        assert_eq!(handled, Handled::Consumed);
        assert!(rig.scroll_left() < scroll);
    }

    #[test]
    fn test_horizontal_dominant_wheel_is_ignored() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        let handled = controller.handle(CarouselEvent::Wheel {
            delta_x: 8.0,
            delta_y: 3.0,
        });
        assert_eq!(handled, Handled::Ignored);
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_wheel_is_ignored_off_desktop() {
        let (rig, mut controller) = single_controller(5);
        controller.settle();

        let handled = controller.handle(CarouselEvent::Wheel {
            delta_x: 0.0,
            delta_y: 5.0,
        });
        assert_eq!(handled, Handled::Ignored);
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_visibility_hidden_pauses_all_then_shown_activates_centered() {
        let (rig, mut controller) = single_controller(5);
        controller.settle();
        rig.set_scroll(2.0 * STEP);

        controller.handle(CarouselEvent::VisibilityChanged { visible: false });
        assert_eq!(controller.carousel().playing_count(), 0);

        controller.handle(CarouselEvent::VisibilityChanged { visible: true });
        assert!(rig.is_playing(2));
        assert_eq!(controller.carousel().playing_count(), 1);
    }

    #[test]
    fn test_resize_reclassifies_and_reactivates_after_settle() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        assert!(rig.is_playing(1));

        controller.handle(CarouselEvent::Resized {
            viewport_width: 400.0,
        });
        assert_eq!(controller.breakpoint(), Breakpoint::Single);

        controller.settle();
        assert_eq!(controller.carousel().playing_count(), 1);
        assert_eq!(rig.last_behavior(), Some(ScrollBehavior::Instant));
    }

    #[test]
    fn test_scrolled_event_is_inert_under_default_config() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        rig.set_scroll(2.0 * STEP);

        controller.handle(CarouselEvent::Scrolled);
        assert!(rig.is_playing(1));
    }

    #[test]
    fn test_scrolled_event_follows_center_when_configured() {
        let (rig, carousel) = CarouselRig::new(5);
        let config = CarouselConfig {
            autoplay_follows_scroll: true,
            ..CarouselConfig::default()
        };
        let mut controller = CarouselController::new(carousel, config).unwrap();
        controller.mount(1280.0);
        controller.settle();

        rig.set_scroll(2.0 * STEP);
        controller.handle(CarouselEvent::Scrolled);
        assert!(rig.is_playing(3));
        assert_eq!(controller.carousel().playing_count(), 1);
    }

    #[test]
    fn test_platform_initiated_play_still_pauses_others() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        assert!(rig.is_playing(1));

        rig.force_playing(3);
        controller.handle(CarouselEvent::Media {
            card: 3,
            change: MediaChange::Played,
        });
        assert!(!rig.is_playing(1));
        assert!(rig.is_playing(3));
        assert_eq!(rig.play_pressed(3), Some(true));
        assert_eq!(rig.play_pressed(1), Some(false));
    }

    #[test]
    fn test_volume_notification_resyncs_mute_button() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();

        rig.set_muted(1, false);
        controller.handle(CarouselEvent::Media {
            card: 1,
            change: MediaChange::VolumeChanged,
        });
        assert_eq!(rig.mute_pressed(1), Some(false));
    }

    #[test]
    fn test_ended_notification_releases_play_button() {
        let (rig, mut controller) = desktop_controller(5);
        controller.settle();
        assert_eq!(rig.play_pressed(1), Some(true));

        rig.force_paused(1);
        controller.handle(CarouselEvent::Media {
            card: 1,
            change: MediaChange::Ended,
        });
        assert_eq!(rig.play_pressed(1), Some(false));
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let (rig, carousel) = CarouselRig::new(0);
        let mut controller =
            CarouselController::new(carousel, CarouselConfig::default()).unwrap();
        controller.mount(1280.0);
        controller.settle();
        controller.handle(CarouselEvent::Wheel {
            delta_x: 0.0,
            delta_y: 5.0,
        });
        controller.handle(CarouselEvent::TrackTap { x: 10.0 });
        assert_eq!(controller.carousel().playing_count(), 0);
        assert_eq!(rig.scroll_left(), 0.0);
    }

    #[test]
    fn test_invalid_thresholds_are_rejected_at_construction() {
        let (_rig, carousel) = CarouselRig::new(3);
        let config = CarouselConfig {
            thresholds: filmstrip_layout::Thresholds {
                desktop_min: 400.0,
                single_max: 450.0,
            },
            ..CarouselConfig::default()
        };
        assert!(CarouselController::new(carousel, config).is_err());
    }
}
