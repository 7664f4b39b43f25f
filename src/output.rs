//! Route printing

use anyhow::Result;
use questpath_graph::ObjectiveGraph;
use questpath_search::RouteOutcome;
use serde::Serialize;

use crate::settings::{OutputFormat, OutputSettings};

/// Machine-readable form of a search outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<u64>,
}

impl RouteSummary {
    pub fn new(outcome: &RouteOutcome, graph: &ObjectiveGraph) -> Self {
        match outcome.route() {
            Some(route) => Self {
                found: true,
                path: Some(route.names(graph).into_iter().map(String::from).collect()),
                total_cost: Some(route.total_cost()),
            },
            None => Self {
                found: false,
                path: None,
                total_cost: None,
            },
        }
    }
}

/// Render the outcome in the configured format.
pub fn render(summary: &RouteSummary, settings: &OutputSettings) -> Result<String> {
    match settings.format {
        OutputFormat::Json => Ok(serde_json::to_string(summary)?),
        OutputFormat::Text => Ok(render_text(summary, settings.show_cost)),
    }
}

fn render_text(summary: &RouteSummary, show_cost: bool) -> String {
    let (Some(path), Some(total_cost)) = (&summary.path, summary.total_cost) else {
        return "No path found.".to_string();
    };

    let mut text = String::from("Path found:\n");
    for name in path {
        text.push_str(name);
        text.push_str(" -> ");
    }
    text.push_str("End");
    if show_cost {
        text.push_str(&format!("\nTotal cost: {}", total_cost));
    }
    text
}
