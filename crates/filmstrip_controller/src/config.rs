// SPDX-License-Identifier: MIT OR Apache-2.0
//! Controller configuration.

use filmstrip_layout::{ConfigError, Thresholds};
use serde::{Deserialize, Serialize};

/// Behavior configuration for a carousel controller.
///
/// The original page shipped three near-duplicate scripts that disagreed on
/// breakpoint thresholds and on whether tap-driven replays force the mute
/// flag; those disagreements live here as configuration instead of being
/// guessed into hard-coded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Breakpoint width thresholds
    pub thresholds: Thresholds,
    /// Mute a video whenever the coordinator activates it. Keeps every
    /// activation path eligible under autoplay policies.
    pub mute_on_activate: bool,
    /// Re-activate the centered card after every settled scroll. Off by
    /// default: a settling nudge scroll must not steal playback from the
    /// card whose click caused the nudge.
    pub autoplay_follows_scroll: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            mute_on_activate: true,
            autoplay_follows_scroll: false,
        }
    }
}

impl CarouselConfig {
    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CarouselConfig::default().validate().is_ok());
    }

    #[test]
    fn test_crossed_thresholds_fail_validation() {
        let config = CarouselConfig {
            thresholds: Thresholds {
                desktop_min: 300.0,
                single_max: 450.0,
            },
            ..CarouselConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
