//! Search results

use questpath_graph::{ObjectiveGraph, ObjectiveId};

/// An ordered chain of objectives from start to goal, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    objectives: Vec<ObjectiveId>,
    total_cost: u64,
}

impl Route {
    pub(crate) fn new(objectives: Vec<ObjectiveId>, total_cost: u64) -> Self {
        debug_assert!(!objectives.is_empty());
        Self {
            objectives,
            total_cost,
        }
    }

    pub fn objectives(&self) -> &[ObjectiveId] {
        &self.objectives
    }

    /// Sum of the costs of the traversed edges
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn start(&self) -> ObjectiveId {
        self.objectives[0]
    }

    pub fn goal(&self) -> ObjectiveId {
        self.objectives[self.objectives.len() - 1]
    }

    /// Number of objectives on the route (edges + 1)
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    /// Always false: a route holds at least its start.
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Objective names in route order.
    pub fn names<'g>(&self, graph: &'g ObjectiveGraph) -> Vec<&'g str> {
        self.objectives
            .iter()
            .filter_map(|id| graph.objective(*id))
            .map(|objective| objective.name())
            .collect()
    }
}

/// Result of a search that was allowed to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Found(Route),
    /// The frontier emptied before the goal was popped.
    Unreachable,
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}
