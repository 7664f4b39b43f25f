//! Scenario descriptions: the caller-facing input that builds a graph
//!
//! A scenario is plain data (objective specs, edge specs, start and goal
//! names) so it can be loaded from TOML or assembled from console input.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GraphError;
use crate::graph::ObjectiveGraph;

/// `(name, urgency, proximity_weight, player_preference)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub name: String,
    pub urgency: i32,
    pub proximity_weight: i32,
    pub player_preference: i32,
}

impl ObjectiveSpec {
    pub fn new(name: &str, urgency: i32, proximity_weight: i32, player_preference: i32) -> Self {
        Self {
            name: name.to_string(),
            urgency,
            proximity_weight,
            player_preference,
        }
    }
}

/// `(from, to, cost)` by objective name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub cost: i64,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str, cost: i64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            cost,
        }
    }
}

/// A complete routing query: the graph plus the start and goal names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: String,
    pub goal: String,
    #[serde(default)]
    pub objectives: Vec<ObjectiveSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Attribute triple for one of the user-tunable objectives
pub type AttributeTriple = (i32, i32, i32);

/// Travel costs of the five fixed routes, in the order
/// Start→A, Start→B, B→C, A→Goal, C→Goal.
pub type FiveRouteCosts = [i64; 5];

impl Scenario {
    /// The fixed Start/A/B/C/Goal topology.
    ///
    /// ```text
    ///          +--> A ---------------+
    ///   Start -+                     +--> Goal
    ///          +--> B ----> C -------+
    /// ```
    ///
    /// Start is always `(1, 1, 1)`; the other attributes and the five route
    /// costs are supplied by the caller.
    pub fn five_objectives(
        a: AttributeTriple,
        b: AttributeTriple,
        c: AttributeTriple,
        goal: AttributeTriple,
        costs: FiveRouteCosts,
    ) -> Self {
        let spec = |name: &str, (u, p, pref): AttributeTriple| ObjectiveSpec::new(name, u, p, pref);
        let [start_a, start_b, b_c, a_goal, c_goal] = costs;

        Self {
            start: "Start".into(),
            goal: "Goal".into(),
            objectives: vec![
                ObjectiveSpec::new("Start", 1, 1, 1),
                spec("A", a),
                spec("B", b),
                spec("C", c),
                spec("Goal", goal),
            ],
            edges: vec![
                EdgeSpec::new("Start", "A", start_a),
                EdgeSpec::new("Start", "B", start_b),
                EdgeSpec::new("B", "C", b_c),
                EdgeSpec::new("A", "Goal", a_goal),
                EdgeSpec::new("C", "Goal", c_goal),
            ],
        }
    }

    /// Build the objective graph. Objectives first, then edges by name.
    pub fn build_graph(&self) -> Result<ObjectiveGraph, GraphError> {
        let mut graph = ObjectiveGraph::new();

        for spec in &self.objectives {
            graph.add_objective(
                spec.name.as_str(),
                spec.urgency,
                spec.proximity_weight,
                spec.player_preference,
            )?;
        }

        for edge in &self.edges {
            graph.connect(&edge.from, &edge.to, edge.cost)?;
        }

        info!(
            "Built graph with {} objectives and {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

impl Default for Scenario {
    /// Five-objective scenario with mid-range objectives and a high-priority goal.
    fn default() -> Self {
        Self::five_objectives((5, 5, 5), (5, 5, 5), (5, 5, 5), (9, 9, 9), [4, 2, 3, 5, 1])
    }
}
