// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewport breakpoint classification.

use serde::{Deserialize, Serialize};

/// Layout mode derived from the viewport width.
///
/// The breakpoint controls how many cards are in view at once and which
/// interactions carry a scroll step. It is recomputed from the latest
/// viewport width on every resize, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakpoint {
    /// Wide viewport, three cards in view, wheel paging enabled
    Desktop,
    /// Between the two thresholds, three cards in view
    Tablet,
    /// Narrow viewport, one card in view with side peeks
    Single,
}

impl Breakpoint {
    /// Number of cards simultaneously in view at this breakpoint
    pub fn cards_in_view(self) -> usize {
        match self {
            Self::Desktop | Self::Tablet => 3,
            Self::Single => 1,
        }
    }

    /// Get the display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Single => "single",
        }
    }
}

/// Width thresholds separating the breakpoints.
///
/// The desktop side is inclusive (`width >= desktop_min` is desktop, the
/// `min-width` media-query convention) and so is the narrow side
/// (`width <= single_max` is single). The source layouts shipped with
/// differing thresholds, so these are configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Widths at or above this are desktop
    pub desktop_min: f32,
    /// Widths at or below this are single-card
    pub single_max: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            desktop_min: 1024.0,
            single_max: 450.0,
        }
    }
}

impl Thresholds {
    /// Check that the thresholds leave room for all three breakpoints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.single_max >= self.desktop_min {
            return Err(ConfigError::ThresholdOrder {
                desktop_min: self.desktop_min,
                single_max: self.single_max,
            });
        }
        Ok(())
    }

    /// Classify a viewport width
    pub fn classify(&self, width: f32) -> Breakpoint {
        if width >= self.desktop_min {
            Breakpoint::Desktop
        } else if width <= self.single_max {
            Breakpoint::Single
        } else {
            Breakpoint::Tablet
        }
    }
}

/// Error for invalid layout configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The single-card threshold reaches past the desktop threshold
    #[error("single_max ({single_max}) must be below desktop_min ({desktop_min})")]
    ThresholdOrder {
        /// Configured desktop threshold
        desktop_min: f32,
        /// Configured single-card threshold
        single_max: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_threshold_is_inclusive() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(1024.0), Breakpoint::Desktop);
        assert_eq!(thresholds.classify(1023.0), Breakpoint::Tablet);
        assert_eq!(thresholds.classify(1920.0), Breakpoint::Desktop);
    }

    #[test]
    fn test_single_threshold_is_inclusive() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(450.0), Breakpoint::Single);
        assert_eq!(thresholds.classify(449.0), Breakpoint::Single);
        assert_eq!(thresholds.classify(451.0), Breakpoint::Tablet);
        assert_eq!(thresholds.classify(320.0), Breakpoint::Single);
    }

    #[test]
    fn test_between_thresholds_is_tablet() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(700.0), Breakpoint::Tablet);
    }

    #[test]
    fn test_cards_in_view() {
        assert_eq!(Breakpoint::Desktop.cards_in_view(), 3);
        assert_eq!(Breakpoint::Tablet.cards_in_view(), 3);
        assert_eq!(Breakpoint::Single.cards_in_view(), 1);
    }

    #[test]
    fn test_validate_rejects_crossed_thresholds() {
        let thresholds = Thresholds {
            desktop_min: 400.0,
            single_max: 450.0,
        };
        assert!(thresholds.validate().is_err());
        assert!(Thresholds::default().validate().is_ok());
    }
}
