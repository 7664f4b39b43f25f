//! Questpath - priority-aware routing between quest objectives
//!
//! Builds an objective graph from a scenario file, the built-in
//! five-objective layout, or console input, then prints the route the
//! priority search picks.

mod loader;
mod output;
mod prompt;
mod settings;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use questpath_graph::Scenario;
use questpath_search::PrioritySearch;

use crate::output::RouteSummary;
use crate::prompt::ConsolePrompt;
use crate::settings::{OutputFormat, Settings};

/// Priority-aware routing between quest objectives
#[derive(Debug, Parser)]
#[command(name = "questpath")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario file (TOML). Defaults to the built-in five-objective layout.
    scenario: Option<PathBuf>,

    /// Override the scenario's start objective
    #[arg(long)]
    start: Option<String>,

    /// Override the scenario's goal objective
    #[arg(long)]
    goal: Option<String>,

    /// Enter objective attributes and route costs on the console
    #[arg(short, long, conflicts_with = "scenario")]
    interactive: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, load_report) = Settings::load();

    init_logging(&settings.logging.level)?;
    load_report.log();

    if cli.json {
        settings.output.format = OutputFormat::Json;
    }

    if cli.save_settings {
        return settings.save();
    }

    let scenario = select_scenario(&cli, &settings)?;
    let start = cli.start.as_deref().unwrap_or(&scenario.start);
    let goal = cli.goal.as_deref().unwrap_or(&scenario.goal);

    let graph = scenario
        .build_graph()
        .context("Failed to build objective graph")?;

    info!("Searching {} -> {}", start, goal);
    let report = PrioritySearch::new(&graph)
        .find_route_by_name(start, goal)
        .context("Invalid route query")?;

    let summary = RouteSummary::new(&report.outcome, &graph);
    println!("{}", output::render(&summary, &settings.output)?);
    Ok(())
}

/// Log to stderr so stdout carries only the route. `RUST_LOG` wins over
/// the configured level.
fn init_logging(level: &str) -> Result<()> {
    let (filter, bad_level) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match EnvFilter::try_new(level) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new("info"), Some(level)),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set subscriber: {}", e))?;

    if let Some(level) = bad_level {
        warn!("Invalid log level '{}' in settings, using info", level);
    }
    Ok(())
}

fn select_scenario(cli: &Cli, settings: &Settings) -> Result<Scenario> {
    if cli.interactive {
        let stdin = io::stdin();
        return ConsolePrompt::new(stdin.lock(), io::stdout()).five_objectives();
    }

    match cli.scenario.as_ref().or(settings.scenario.default_path.as_ref()) {
        Some(path) => loader::load_scenario(path),
        None => {
            info!("No scenario given, using the built-in five-objective layout");
            Ok(Scenario::default())
        }
    }
}
