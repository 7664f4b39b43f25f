//! Objectives: routable locations with a static base priority

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Identifies the graph an objective belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(u32);

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(1);

impl GraphId {
    /// Allocate a new process-unique graph ID.
    pub(crate) fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an objective inside an [`ObjectiveGraph`](crate::ObjectiveGraph).
///
/// Compact slot index plus the owning graph, so a handle from one graph is
/// never mistaken for a member of another.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveId {
    pub(crate) graph: GraphId,
    pub(crate) index: u32,
}

impl ObjectiveId {
    /// The slot index of this objective within its graph.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The graph this objective was created in.
    pub fn graph(&self) -> GraphId {
        self.graph
    }
}

impl fmt::Debug for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Objective({}@g{})", self.index, self.graph.0)
    }
}

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// The three player-facing attributes of an objective.
///
/// Conventionally 1-10. Only non-negativity is enforced, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub urgency: u32,
    pub proximity_weight: u32,
    pub player_preference: u32,
}

impl Attributes {
    /// `urgency * proximity_weight + player_preference`
    pub fn base_priority(&self) -> u64 {
        u64::from(self.urgency) * u64::from(self.proximity_weight)
            + u64::from(self.player_preference)
    }
}

/// A directed, costed connection to another objective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: ObjectiveId,
    pub cost: u64,
}

/// A quest/objective location in the world
#[derive(Debug, Clone)]
pub struct Objective {
    id: ObjectiveId,
    name: String,
    attributes: Attributes,
    base_priority: u64,
    pub(crate) edges: Vec<Edge>,
}

impl Objective {
    pub(crate) fn new(id: ObjectiveId, name: String, attributes: Attributes) -> Self {
        Self {
            id,
            name,
            base_priority: attributes.base_priority(),
            attributes,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectiveId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn urgency(&self) -> u32 {
        self.attributes.urgency
    }

    pub fn proximity_weight(&self) -> u32 {
        self.attributes.proximity_weight
    }

    pub fn player_preference(&self) -> u32 {
        self.attributes.player_preference
    }

    /// Static priority score, cached at construction.
    pub fn base_priority(&self) -> u64 {
        self.base_priority
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
