//! Per-run transient search state
//!
//! One record per objective, indexed by slot. The arena is created fresh for
//! every search and dropped with it, so the graph itself is never written to.

use questpath_graph::{Objective, ObjectiveId};

use crate::route::Route;

/// Lifecycle of an objective within one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Not reached yet.
    Unvisited,
    /// Queued with a finite best cost.
    Frontier,
    /// Popped and expanded at least once.
    Finalized,
}

#[derive(Debug, Clone, Copy)]
struct Record {
    best_cost: Option<u64>,
    predecessor: Option<ObjectiveId>,
    /// Cost of the edge `predecessor -> self` that produced `best_cost`.
    arrival_cost: u64,
    search_priority: Option<u64>,
    visit: VisitState,
}

impl Record {
    const UNREACHED: Record = Record {
        best_cost: None,
        predecessor: None,
        arrival_cost: 0,
        search_priority: None,
        visit: VisitState::Unvisited,
    };
}

/// A successful relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relaxation {
    pub previous_cost: Option<u64>,
    pub best_cost: u64,
    pub search_priority: u64,
}

pub(crate) struct SearchState {
    records: Vec<Record>,
}

impl SearchState {
    pub(crate) fn new(objective_count: usize) -> Self {
        Self {
            records: vec![Record::UNREACHED; objective_count],
        }
    }

    /// Mark `start` reached at cost 0. Returns its search priority.
    pub(crate) fn seed(&mut self, start: &Objective) -> u64 {
        let record = &mut self.records[start.id().index()];
        let priority = start.base_priority();
        record.best_cost = Some(0);
        record.search_priority = Some(priority);
        record.visit = VisitState::Frontier;
        priority
    }

    pub(crate) fn best_cost(&self, id: ObjectiveId) -> Option<u64> {
        self.records[id.index()].best_cost
    }

    pub(crate) fn search_priority(&self, id: ObjectiveId) -> Option<u64> {
        self.records[id.index()].search_priority
    }

    pub(crate) fn predecessor(&self, id: ObjectiveId) -> Option<ObjectiveId> {
        self.records[id.index()].predecessor
    }

    pub(crate) fn visit(&self, id: ObjectiveId) -> VisitState {
        self.records[id.index()].visit
    }

    pub(crate) fn finalize(&mut self, id: ObjectiveId) {
        self.records[id.index()].visit = VisitState::Finalized;
    }

    /// Try to improve `neighbor` through `current` over an edge of `edge_cost`.
    ///
    /// Only a strict improvement updates the record; ties leave the existing
    /// predecessor in place.
    pub(crate) fn relax(
        &mut self,
        current: ObjectiveId,
        neighbor: &Objective,
        edge_cost: u64,
    ) -> Option<Relaxation> {
        let from_cost = self.best_cost(current)?;
        let tentative = from_cost.saturating_add(edge_cost);

        let record = &mut self.records[neighbor.id().index()];
        if record.best_cost.is_some_and(|known| tentative >= known) {
            return None;
        }

        let previous_cost = record.best_cost;
        let search_priority = tentative.saturating_add(neighbor.base_priority());
        record.best_cost = Some(tentative);
        record.predecessor = Some(current);
        record.arrival_cost = edge_cost;
        record.search_priority = Some(search_priority);
        record.visit = VisitState::Frontier;

        Some(Relaxation {
            previous_cost,
            best_cost: tentative,
            search_priority,
        })
    }

    /// Follow predecessor links back from `goal` and build the route.
    ///
    /// The total is summed from the edges actually used, so it always
    /// matches the returned sequence.
    ///
    /// # Panics
    ///
    /// If the predecessor links form a cycle. `relax` only accepts strict
    /// improvements, so a run never produces one.
    pub(crate) fn reconstruct(&self, goal: ObjectiveId) -> Route {
        let mut objectives = vec![goal];
        let mut total_cost = 0u64;
        let mut current = goal;

        // A predecessor chain never revisits a node, so it is at most
        // `records.len()` long
        while let Some(previous) = self.predecessor(current) {
            total_cost = total_cost.saturating_add(self.records[current.index()].arrival_cost);
            objectives.push(previous);
            current = previous;
            assert!(
                objectives.len() <= self.records.len(),
                "predecessor chain longer than the graph"
            );
        }

        objectives.reverse();
        Route::new(objectives, total_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questpath_graph::ObjectiveGraph;

    fn line_graph() -> (ObjectiveGraph, ObjectiveId, ObjectiveId, ObjectiveId) {
        let mut graph = ObjectiveGraph::new();
        let a = graph.add_objective("A", 1, 1, 1).unwrap();
        let b = graph.add_objective("B", 2, 3, 4).unwrap();
        let c = graph.add_objective("C", 1, 1, 0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn test_fresh_state_is_unreached() {
        let (graph, a, b, _) = line_graph();
        let state = SearchState::new(graph.len());
        assert_eq!(state.best_cost(a), None);
        assert_eq!(state.search_priority(b), None);
        assert_eq!(state.visit(a), VisitState::Unvisited);
    }

    #[test]
    fn test_seed_sets_start_priority() {
        let (graph, a, _, _) = line_graph();
        let mut state = SearchState::new(graph.len());

        let priority = state.seed(graph.objective(a).unwrap());
        assert_eq!(priority, 2);
        assert_eq!(state.best_cost(a), Some(0));
        assert_eq!(state.visit(a), VisitState::Frontier);
        assert_eq!(state.predecessor(a), None);
    }

    #[test]
    fn test_relax_requires_strict_improvement() {
        let (graph, a, b, _) = line_graph();
        let mut state = SearchState::new(graph.len());
        state.seed(graph.objective(a).unwrap());
        let b_obj = graph.objective(b).unwrap();

        let first = state.relax(a, b_obj, 5).unwrap();
        assert_eq!(first.previous_cost, None);
        assert_eq!(first.best_cost, 5);
        assert_eq!(first.search_priority, 5 + 10);

        // Equal cost is not an improvement
        assert!(state.relax(a, b_obj, 5).is_none());
        // Worse cost is ignored
        assert!(state.relax(a, b_obj, 8).is_none());
        assert_eq!(state.best_cost(b), Some(5));

        let better = state.relax(a, b_obj, 2).unwrap();
        assert_eq!(better.previous_cost, Some(5));
        assert_eq!(state.best_cost(b), Some(2));
        assert_eq!(state.predecessor(b), Some(a));
    }

    #[test]
    fn test_relax_from_unreached_is_noop() {
        let (graph, a, b, _) = line_graph();
        let mut state = SearchState::new(graph.len());
        assert!(state.relax(a, graph.objective(b).unwrap(), 1).is_none());
        assert_eq!(state.best_cost(b), None);
    }

    #[test]
    fn test_finalized_node_can_reenter_frontier() {
        let (graph, a, b, _) = line_graph();
        let mut state = SearchState::new(graph.len());
        state.seed(graph.objective(a).unwrap());
        let b_obj = graph.objective(b).unwrap();

        state.relax(a, b_obj, 9).unwrap();
        state.finalize(b);
        assert_eq!(state.visit(b), VisitState::Finalized);

        state.relax(a, b_obj, 1).unwrap();
        assert_eq!(state.visit(b), VisitState::Frontier);
    }

    #[test]
    fn test_reconstruct_sums_used_edges() {
        let (graph, a, b, c) = line_graph();
        let mut state = SearchState::new(graph.len());
        state.seed(graph.objective(a).unwrap());
        state.relax(a, graph.objective(b).unwrap(), 4).unwrap();
        state.relax(b, graph.objective(c).unwrap(), 3).unwrap();

        let route = state.reconstruct(c);
        assert_eq!(route.objectives(), &[a, b, c]);
        assert_eq!(route.total_cost(), 7);
    }

    #[test]
    fn test_reconstruct_start_only() {
        let (graph, a, _, _) = line_graph();
        let mut state = SearchState::new(graph.len());
        state.seed(graph.objective(a).unwrap());

        let route = state.reconstruct(a);
        assert_eq!(route.objectives(), &[a]);
        assert_eq!(route.total_cost(), 0);
    }

    #[test]
    #[should_panic(expected = "predecessor chain longer than the graph")]
    fn test_reconstruct_rejects_predecessor_cycle() {
        let (graph, a, b, c) = line_graph();
        let mut state = SearchState::new(graph.len());
        state.seed(graph.objective(a).unwrap());
        state.relax(a, graph.objective(b).unwrap(), 1).unwrap();
        state.relax(b, graph.objective(c).unwrap(), 1).unwrap();
        // Corrupt the links into b -> c -> b
        state.records[b.index()].predecessor = Some(c);

        state.reconstruct(c);
    }
}
