// SPDX-License-Identifier: MIT OR Apache-2.0
//! Filmstrip simulation harness.
//!
//! Drives the carousel controller against an in-memory page so the whole
//! behavior - mount, settle, clicks, peeks, wheel paging, visibility and
//! resize resync - can be exercised from the command line:
//!
//! ```text
//! filmstrip [scenario.ron]
//! ```
//!
//! Without an argument a built-in desktop walkthrough runs. The final page
//! state is printed as JSON.

mod host;
mod scenario;

use scenario::{Scenario, ScenarioError};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("filmstrip_app=info".parse().unwrap())
        .add_directive("filmstrip_controller=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(error) = run() {
        tracing::error!(%error, "scenario failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ScenarioError> {
    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(&PathBuf::from(path))?,
        None => Scenario::demo(),
    };

    let report = scenario.run()?;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(error) => tracing::error!(%error, "failed to serialize report"),
    }
    Ok(())
}
