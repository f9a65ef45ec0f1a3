// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scenario files and the scenario runner.
//!
//! A scenario describes a page (card count and geometry, autoplay policy),
//! a controller configuration, and a list of steps: settle ticks and host
//! events. Scenarios are authored in RON; running one yields a report of
//! the page's final state.

use crate::host::{AutoplayPolicy, SimPage};
use filmstrip_controller::{CarouselConfig, CarouselController, CarouselEvent};
use filmstrip_layout::{Breakpoint, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Uniform card geometry for the simulated page
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CardSpec {
    /// Number of cards
    pub count: usize,
    /// Rendered width of each card
    pub width: f32,
    /// Gap between adjacent cards
    pub gap: f32,
}

/// One step of a scenario
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Step {
    /// Run the controller's deferred-tick hook
    Settle,
    /// Forward a host event
    Event(CarouselEvent),
}

/// A complete simulation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name, echoed in the report
    pub name: String,
    /// Window width the breakpoint is classified from
    pub viewport_width: f32,
    /// Visible width of the scroll track
    pub track_width: f32,
    /// Card geometry
    pub cards: CardSpec,
    /// Simulated autoplay policy
    pub autoplay: AutoplayPolicy,
    /// Controller configuration
    #[serde(default)]
    pub config: CarouselConfig,
    /// Steps to run after mounting
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Load a scenario from a RON file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Built-in scenario used when no file is given: a five-card desktop
    /// walkthrough exercising mount, an edge click, wheel paging, and a
    /// visibility round trip.
    pub fn demo() -> Self {
        use filmstrip_controller::ControlKind;

        Self {
            name: "desktop walkthrough".to_owned(),
            viewport_width: 1280.0,
            track_width: 940.0,
            cards: CardSpec {
                count: 5,
                width: 300.0,
                gap: 20.0,
            },
            autoplay: AutoplayPolicy::Allow,
            config: CarouselConfig::default(),
            steps: vec![
                Step::Settle,
                Step::Event(CarouselEvent::ControlClick {
                    card: 2,
                    control: ControlKind::Play,
                }),
                Step::Event(CarouselEvent::Scrolled),
                Step::Event(CarouselEvent::Wheel {
                    delta_x: 0.0,
                    delta_y: 4.0,
                }),
                Step::Event(CarouselEvent::VisibilityChanged { visible: false }),
                Step::Event(CarouselEvent::VisibilityChanged { visible: true }),
            ],
        }
    }

    /// Run the scenario and report the page's final state
    pub fn run(&self) -> Result<CarouselReport, ScenarioError> {
        let (page, carousel) = SimPage::build(
            self.cards.count,
            self.track_width,
            self.cards.width,
            self.cards.gap,
            self.autoplay,
        );
        let mut controller = CarouselController::new(carousel, self.config)?;

        tracing::info!(name = %self.name, "running scenario");
        controller.mount(self.viewport_width);
        for step in &self.steps {
            match step {
                Step::Settle => controller.settle(),
                Step::Event(event) => {
                    let handled = controller.handle(*event);
                    tracing::debug!(?event, consumed = handled.is_consumed(), "step");
                }
            }
        }

        Ok(CarouselReport {
            scenario: self.name.clone(),
            breakpoint: controller.breakpoint(),
            scroll_left: page.scroll_left(),
            playing: page.playing(),
            muted: page.muted(),
            play_pressed: page.play_pressed(),
            mute_pressed: page.mute_pressed(),
        })
    }
}

/// Final page state after a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct CarouselReport {
    /// Scenario name
    pub scenario: String,
    /// Breakpoint at the end of the run
    pub breakpoint: Breakpoint,
    /// Track scroll offset at the end of the run
    pub scroll_left: f32,
    /// Indices of playing videos
    pub playing: Vec<usize>,
    /// Indices of muted videos
    pub muted: Vec<usize>,
    /// Play-button pressed states, `None` where never written
    pub play_pressed: Vec<Option<bool>>,
    /// Mute-button pressed states, `None` where never written
    pub mute_pressed: Vec<Option<bool>>,
}

/// Error loading or running a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed
    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Controller configuration was invalid
    #[error("invalid controller configuration: {0}")]
    Config(#[from] ConfigError),
}
