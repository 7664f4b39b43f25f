//! Objective graph: an arena of objectives with directed weighted edges

use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;
use crate::objective::{Attributes, Edge, GraphId, Objective, ObjectiveId};

/// A small directed graph of objectives.
///
/// Objectives are never removed, so an [`ObjectiveId`] stays valid for the
/// lifetime of the graph. Cycles and duplicate edges are allowed.
#[derive(Debug, Clone)]
pub struct ObjectiveGraph {
    id: GraphId,
    objectives: Vec<Objective>,
    by_name: HashMap<String, ObjectiveId>,
    edge_count: usize,
}

impl ObjectiveGraph {
    pub fn new() -> Self {
        Self {
            id: GraphId::next(),
            objectives: Vec::new(),
            by_name: HashMap::new(),
            edge_count: 0,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Add an objective and compute its base priority.
    ///
    /// Attributes outside 1-10 are accepted; negative values are rejected
    /// and leave the graph untouched.
    pub fn add_objective(
        &mut self,
        name: impl Into<String>,
        urgency: i32,
        proximity_weight: i32,
        player_preference: i32,
    ) -> Result<ObjectiveId, GraphError> {
        let name = name.into();

        let attributes = Attributes {
            urgency: non_negative(&name, "urgency", urgency)?,
            proximity_weight: non_negative(&name, "proximity weight", proximity_weight)?,
            player_preference: non_negative(&name, "player preference", player_preference)?,
        };

        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateObjective(name));
        }

        let id = ObjectiveId {
            graph: self.id,
            index: next_index(self.objectives.len())?,
        };
        let objective = Objective::new(id, name.clone(), attributes);
        debug!(
            "Added objective '{}' (base priority {})",
            name,
            objective.base_priority()
        );

        self.objectives.push(objective);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Append a directed edge `source -> target`.
    pub fn add_edge(
        &mut self,
        source: ObjectiveId,
        target: ObjectiveId,
        cost: i64,
    ) -> Result<(), GraphError> {
        self.check_member(source)?;
        self.check_member(target)?;

        let Ok(cost) = u64::try_from(cost) else {
            return Err(GraphError::InvalidEdge {
                from: self.objectives[source.index()].name().to_string(),
                to: self.objectives[target.index()].name().to_string(),
                cost,
            });
        };

        self.objectives[source.index()]
            .edges
            .push(Edge { target, cost });
        self.edge_count += 1;
        debug!(
            "Added edge {} -> {} (cost {})",
            self.objectives[source.index()].name(),
            self.objectives[target.index()].name(),
            cost
        );
        Ok(())
    }

    /// Add an edge between two objectives looked up by name.
    pub fn connect(&mut self, from: &str, to: &str, cost: i64) -> Result<(), GraphError> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        self.add_edge(source, target, cost)
    }

    /// Whether `id` was created by this graph.
    pub fn contains(&self, id: ObjectiveId) -> bool {
        id.graph == self.id && id.index() < self.objectives.len()
    }

    pub fn objective(&self, id: ObjectiveId) -> Option<&Objective> {
        if self.contains(id) {
            self.objectives.get(id.index())
        } else {
            None
        }
    }

    /// Look up an objective by name.
    pub fn find(&self, name: &str) -> Option<ObjectiveId> {
        self.by_name.get(name).copied()
    }

    /// Outgoing edges of `id`, empty for non-members.
    pub fn edges_from(&self, id: ObjectiveId) -> &[Edge] {
        self.objective(id).map(Objective::edges).unwrap_or(&[])
    }

    /// Iterate objectives in creation order.
    pub fn objectives(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter()
    }

    /// Number of objectives
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn check_member(&self, id: ObjectiveId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::ForeignObjective(id))
        }
    }

    fn require(&self, name: &str) -> Result<ObjectiveId, GraphError> {
        self.find(name)
            .ok_or_else(|| GraphError::UnknownObjective(name.to_string()))
    }
}

impl Default for ObjectiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot index for the objective after `len` existing ones.
fn next_index(len: usize) -> Result<u32, GraphError> {
    u32::try_from(len).map_err(|_| GraphError::CapacityExceeded(len))
}

fn non_negative(objective: &str, attribute: &'static str, value: i32) -> Result<u32, GraphError> {
    u32::try_from(value).map_err(|_| GraphError::InvalidAttribute {
        objective: objective.to_string(),
        attribute,
        value: i64::from(value),
    })
}
