// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll targets for centering a card.

use crate::geometry::{CardExtent, TrackMetrics};
use serde::{Deserialize, Serialize};

/// How a scroll command should be applied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    /// Animated scroll, for user-triggered navigation
    Smooth,
    /// Immediate positioning, for mount and resize settling
    Instant,
}

/// Scroll offset that centers a card in the track's viewport.
///
/// Clamped to `[0, content_width - viewport_width]` so a card near either
/// end never over-scrolls past the first or last card.
pub fn scroll_target(metrics: &TrackMetrics, extent: &CardExtent) -> f32 {
    let center_offset = ((metrics.viewport_width - extent.width) / 2.0).max(0.0);
    (extent.left - center_offset).clamp(0.0, metrics.max_scroll())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(viewport_width: f32) -> TrackMetrics {
        // Five 300-wide cards with 20 gaps.
        TrackMetrics {
            scroll_left: 0.0,
            viewport_width,
            content_width: 1580.0,
            gap: 20.0,
        }
    }

    #[test]
    fn test_first_card_never_scrolls_negative() {
        let target = scroll_target(
            &metrics(940.0),
            &CardExtent {
                left: 0.0,
                width: 300.0,
            },
        );
        assert_eq!(target, 0.0);
    }

    #[test]
    fn test_last_card_clamps_to_max_scroll() {
        let m = metrics(940.0);
        let target = scroll_target(
            &m,
            &CardExtent {
                left: 1280.0,
                width: 300.0,
            },
        );
        assert_eq!(target, m.max_scroll());
        assert_eq!(target, 640.0);
    }

    #[test]
    fn test_middle_card_lands_centered() {
        let m = metrics(940.0);
        let extent = CardExtent {
            left: 640.0,
            width: 300.0,
        };
        let target = scroll_target(&m, &extent);
        // The card's center coincides with the viewport's center.
        assert_eq!(target + m.viewport_width / 2.0, extent.center());
    }

    #[test]
    fn test_card_wider_than_viewport_pins_left_edge() {
        let m = metrics(200.0);
        let extent = CardExtent {
            left: 320.0,
            width: 300.0,
        };
        assert_eq!(scroll_target(&m, &extent), 320.0);
    }
}
