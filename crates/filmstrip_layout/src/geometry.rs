// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track and card geometry.
//!
//! The queries here answer "which card is where" from a snapshot of the
//! track: the scroll offset plus each card's rendered position and width.
//! All positions are content-relative, i.e. measured from the left edge of
//! the track's scrollable content, not from the viewport.

use serde::{Deserialize, Serialize};

/// Snapshot of the scroll track's measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackMetrics {
    /// Current horizontal scroll offset
    pub scroll_left: f32,
    /// Visible width of the track
    pub viewport_width: f32,
    /// Total width of the scrollable content
    pub content_width: f32,
    /// Gap between adjacent cards
    pub gap: f32,
}

impl TrackMetrics {
    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Content-relative position of the viewport's center
    pub fn view_center(&self) -> f32 {
        self.scroll_left + self.viewport_width / 2.0
    }
}

/// Rendered position and width of one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardExtent {
    /// Content-relative left edge
    pub left: f32,
    /// Rendered width
    pub width: f32,
}

impl CardExtent {
    /// Content-relative position of the card's center
    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Contiguous run of visible card indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    /// First visible index
    pub first: usize,
    /// Last visible index
    pub last: usize,
}

/// Distance from one card's left edge to the next.
///
/// Cards share a width in this carousel pattern, so the first card plus the
/// track gap is the stride. Returns `None` while the layout is unmeasurable
/// (no cards, or the first card has not been given a width yet) so callers
/// defer instead of dividing by zero-sized geometry.
pub fn step_width(metrics: &TrackMetrics, extents: &[CardExtent]) -> Option<f32> {
    let step = extents.first()?.width + metrics.gap;
    if step <= 0.0 {
        return None;
    }
    Some(step)
}

/// Index of the first card in view at the current scroll offset
pub fn first_visible_index(metrics: &TrackMetrics, extents: &[CardExtent]) -> Option<usize> {
    let step = step_width(metrics, extents)?;
    let index = (metrics.scroll_left / step).round().max(0.0) as usize;
    Some(index.min(extents.len() - 1))
}

/// Run of `count` card indices in view at the current scroll offset
pub fn visible_range(
    metrics: &TrackMetrics,
    extents: &[CardExtent],
    count: usize,
) -> Option<VisibleRange> {
    let first = first_visible_index(metrics, extents)?;
    let last = (first + count.saturating_sub(1)).min(extents.len() - 1);
    Some(VisibleRange { first, last })
}

/// Card whose center is nearest the viewport's center.
///
/// Ties break to the lowest index. Returns `None` while the layout is
/// unmeasurable.
pub fn centered_index(metrics: &TrackMetrics, extents: &[CardExtent]) -> Option<usize> {
    step_width(metrics, extents)?;

    let target = metrics.view_center();
    let mut best = None;
    let mut best_distance = f32::INFINITY;
    for (index, extent) in extents.iter().enumerate() {
        let distance = (extent.center() - target).abs();
        if distance < best_distance {
            best_distance = distance;
            best = Some(index);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_WIDTH: f32 = 300.0;
    const GAP: f32 = 20.0;

    fn rig(count: usize, viewport_width: f32, scroll_left: f32) -> (TrackMetrics, Vec<CardExtent>) {
        let step = CARD_WIDTH + GAP;
        let extents: Vec<CardExtent> = (0..count)
            .map(|i| CardExtent {
                left: i as f32 * step,
                width: CARD_WIDTH,
            })
            .collect();
        let content_width = count as f32 * CARD_WIDTH + (count.saturating_sub(1)) as f32 * GAP;
        let metrics = TrackMetrics {
            scroll_left,
            viewport_width,
            content_width,
            gap: GAP,
        };
        (metrics, extents)
    }

    #[test]
    fn test_centered_index_at_step_multiples() {
        // Single-card viewport: scrolling by k steps centers card k.
        for k in 0..5 {
            let (metrics, extents) = rig(5, CARD_WIDTH, k as f32 * (CARD_WIDTH + GAP));
            assert_eq!(centered_index(&metrics, &extents), Some(k));
        }
    }

    #[test]
    fn test_centered_index_tie_breaks_low() {
        // View center exactly between card 1 and card 2.
        let (mut metrics, extents) = rig(5, CARD_WIDTH, 0.0);
        metrics.scroll_left = 1.0 * (CARD_WIDTH + GAP) + (CARD_WIDTH + GAP) / 2.0;
        assert_eq!(centered_index(&metrics, &extents), Some(1));
    }

    #[test]
    fn test_unmeasurable_layout_defers() {
        let (metrics, mut extents) = rig(5, 940.0, 0.0);
        for extent in &mut extents {
            extent.width = 0.0;
        }
        let metrics = TrackMetrics { gap: 0.0, ..metrics };
        assert_eq!(step_width(&metrics, &extents), None);
        assert_eq!(centered_index(&metrics, &extents), None);
        assert_eq!(first_visible_index(&metrics, &extents), None);
        assert_eq!(visible_range(&metrics, &extents, 3), None);
    }

    #[test]
    fn test_empty_track_defers() {
        let metrics = TrackMetrics {
            scroll_left: 0.0,
            viewport_width: 940.0,
            content_width: 0.0,
            gap: GAP,
        };
        assert_eq!(centered_index(&metrics, &[]), None);
        assert_eq!(first_visible_index(&metrics, &[]), None);
    }

    #[test]
    fn test_first_visible_index_rounds_to_nearest_step() {
        let (metrics, extents) = rig(5, 940.0, 2.0 * (CARD_WIDTH + GAP));
        assert_eq!(first_visible_index(&metrics, &extents), Some(2));

        // Partway through a smooth scroll, nearest step wins.
        let (metrics, extents) = rig(5, 940.0, 2.0 * (CARD_WIDTH + GAP) + 100.0);
        assert_eq!(first_visible_index(&metrics, &extents), Some(2));
    }

    #[test]
    fn test_first_visible_index_clamps_to_last_card() {
        let (metrics, extents) = rig(5, 940.0, 10_000.0);
        assert_eq!(first_visible_index(&metrics, &extents), Some(4));
    }

    #[test]
    fn test_visible_range_spans_count_and_clamps() {
        let (metrics, extents) = rig(5, 940.0, 0.0);
        assert_eq!(
            visible_range(&metrics, &extents, 3),
            Some(VisibleRange { first: 0, last: 2 })
        );

        let (metrics, extents) = rig(5, 940.0, 3.0 * (CARD_WIDTH + GAP));
        assert_eq!(
            visible_range(&metrics, &extents, 3),
            Some(VisibleRange { first: 3, last: 4 })
        );
    }
}
