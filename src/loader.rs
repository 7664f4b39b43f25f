//! Scenario files
//!
//! ```toml
//! start = "Start"
//! goal = "Goal"
//!
//! [[objectives]]
//! name = "Start"
//! urgency = 1
//! proximity_weight = 1
//! player_preference = 1
//!
//! [[edges]]
//! from = "Start"
//! to = "Goal"
//! cost = 4
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use questpath_graph::Scenario;
use tracing::info;

/// Read and parse a scenario file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {:?}", path))?;
    let scenario =
        parse_scenario(&content).with_context(|| format!("Invalid scenario file {:?}", path))?;
    info!(
        "Loaded scenario from {:?} ({} objectives, {} edges)",
        path,
        scenario.objectives.len(),
        scenario.edges.len()
    );
    Ok(scenario)
}

pub fn parse_scenario(content: &str) -> Result<Scenario> {
    Ok(toml::from_str(content)?)
}
