//! Priority-guided best-first search over an objective graph
//!
//! Expansion order is `best_cost + base_priority`. The base priority is a
//! static per-objective score rather than an estimate of the remaining
//! distance, so the engine is not a shortest-path search: a cheap route
//! through high-priority objectives can lose to a costlier route through
//! low-priority ones. Callers get priority-aware routing, not a guaranteed
//! minimum-cost path.

use tracing::{debug, info};

use questpath_graph::{Objective, ObjectiveGraph, ObjectiveId};

use crate::error::{Endpoint, SearchError};
use crate::frontier::Frontier;
use crate::route::RouteOutcome;
use crate::state::{Relaxation, SearchState};

/// Hooks into a running search. All methods default to no-ops.
pub trait SearchEvents {
    /// `objective` was popped and is about to be expanded.
    fn on_expand(&mut self, _objective: ObjectiveId, _best_cost: u64) {}

    /// `to` was improved through `from`.
    fn on_relax(&mut self, _from: ObjectiveId, _to: ObjectiveId, _relaxation: &Relaxation) {}

    /// An outdated queue entry for `objective` was discarded.
    fn on_stale(&mut self, _objective: ObjectiveId) {}
}

impl SearchEvents for () {}

/// Counters for one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Objectives popped and expanded (re-expansions included)
    pub expanded: usize,
    /// Successful relaxations
    pub relaxed: usize,
    /// Popped entries ignored because a cheaper one superseded them
    pub stale_skipped: usize,
    /// Largest frontier size seen
    pub max_frontier: usize,
}

/// Outcome plus counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: RouteOutcome,
    pub stats: SearchStats,
}

/// Frontier entry. Several may exist for one objective; only the one whose
/// cost still matches the objective's best cost is live.
#[derive(Debug, Clone, Copy)]
struct Pending {
    objective: ObjectiveId,
    cost: u64,
    priority: u64,
}

/// Search engine bound to one graph.
///
/// Holds the graph immutably; every query gets a fresh transient arena, so
/// repeated or parallel queries over the same graph never interfere.
#[derive(Debug, Clone, Copy)]
pub struct PrioritySearch<'g> {
    graph: &'g ObjectiveGraph,
}

impl<'g> PrioritySearch<'g> {
    pub fn new(graph: &'g ObjectiveGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g ObjectiveGraph {
        self.graph
    }

    /// Find a route from `start` to `goal`.
    ///
    /// Returns `Err` only for a malformed query; an unreachable goal is
    /// reported as [`RouteOutcome::Unreachable`].
    pub fn find_route(
        &self,
        start: ObjectiveId,
        goal: ObjectiveId,
    ) -> Result<SearchReport, SearchError> {
        self.find_route_with(start, goal, &mut ())
    }

    /// Same as [`find_route`](Self::find_route), looking endpoints up by name.
    pub fn find_route_by_name(&self, start: &str, goal: &str) -> Result<SearchReport, SearchError> {
        let start_id = self
            .graph
            .find(start)
            .ok_or_else(|| SearchError::unknown(Endpoint::Start, start))?;
        let goal_id = self
            .graph
            .find(goal)
            .ok_or_else(|| SearchError::unknown(Endpoint::Goal, goal))?;
        self.find_route(start_id, goal_id)
    }

    /// Run a search, reporting each step to `events`.
    pub fn find_route_with<E: SearchEvents>(
        &self,
        start: ObjectiveId,
        goal: ObjectiveId,
        events: &mut E,
    ) -> Result<SearchReport, SearchError> {
        let start_obj = self.endpoint(Endpoint::Start, start)?;
        let goal_obj = self.endpoint(Endpoint::Goal, goal)?;

        let mut state = SearchState::new(self.graph.len());
        let mut stats = SearchStats::default();
        let mut frontier = Frontier::new(|pending: &Pending| pending.priority);

        let priority = state.seed(start_obj);
        frontier.push(Pending {
            objective: start,
            cost: 0,
            priority,
        });
        stats.max_frontier = 1;

        while let Some(pending) = frontier.pop() {
            let current = pending.objective;

            if current == goal {
                let route = state.reconstruct(goal);
                info!(
                    "Route {} -> {} found: {} objectives, cost {} ({} expanded, {} relaxed)",
                    start_obj.name(),
                    goal_obj.name(),
                    route.len(),
                    route.total_cost(),
                    stats.expanded,
                    stats.relaxed
                );
                return Ok(SearchReport {
                    outcome: RouteOutcome::Found(route),
                    stats,
                });
            }

            let Some(best_cost) = state.best_cost(current) else {
                continue;
            };
            if pending.cost > best_cost {
                debug!(
                    "Skipping stale entry for {} (priority {}, live priority {:?})",
                    self.name_of(current),
                    pending.priority,
                    state.search_priority(current)
                );
                stats.stale_skipped += 1;
                events.on_stale(current);
                continue;
            }

            debug!(
                "Expanding {} (cost {}, priority {}, was {:?})",
                self.name_of(current),
                best_cost,
                pending.priority,
                state.visit(current)
            );
            state.finalize(current);
            stats.expanded += 1;
            events.on_expand(current, best_cost);

            for edge in self.graph.edges_from(current) {
                let Some(neighbor) = self.graph.objective(edge.target) else {
                    continue;
                };
                let Some(relaxation) = state.relax(current, neighbor, edge.cost) else {
                    continue;
                };

                stats.relaxed += 1;
                events.on_relax(current, edge.target, &relaxation);
                debug!(
                    "Relaxed {} via {}: cost {}, priority {}",
                    neighbor.name(),
                    self.name_of(current),
                    relaxation.best_cost,
                    relaxation.search_priority
                );

                frontier.push(Pending {
                    objective: edge.target,
                    cost: relaxation.best_cost,
                    priority: relaxation.search_priority,
                });
                stats.max_frontier = stats.max_frontier.max(frontier.len());
            }
        }

        info!(
            "No route {} -> {} ({} expanded, {} relaxed)",
            start_obj.name(),
            goal_obj.name(),
            stats.expanded,
            stats.relaxed
        );
        Ok(SearchReport {
            outcome: RouteOutcome::Unreachable,
            stats,
        })
    }

    fn name_of(&self, id: ObjectiveId) -> &'g str {
        self.graph.objective(id).map_or("?", Objective::name)
    }

    fn endpoint(&self, endpoint: Endpoint, id: ObjectiveId) -> Result<&'g Objective, SearchError> {
        self.graph
            .objective(id)
            .ok_or_else(|| SearchError::foreign(endpoint, id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap, VecDeque};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use questpath_graph::Scenario;

    use super::*;
    use crate::error::QueryProblem;
    use crate::route::Route;

    /// Records every event so tests can inspect the run
    #[derive(Default)]
    struct Recorder {
        expanded: Vec<(ObjectiveId, u64)>,
        relaxed: Vec<(ObjectiveId, Relaxation)>,
        stale: Vec<ObjectiveId>,
    }

    impl SearchEvents for Recorder {
        fn on_expand(&mut self, objective: ObjectiveId, best_cost: u64) {
            self.expanded.push((objective, best_cost));
        }

        fn on_relax(&mut self, _from: ObjectiveId, to: ObjectiveId, relaxation: &Relaxation) {
            self.relaxed.push((to, *relaxation));
        }

        fn on_stale(&mut self, objective: ObjectiveId) {
            self.stale.push(objective);
        }
    }

    fn found(report: &SearchReport) -> &Route {
        report.outcome.route().expect("expected a route")
    }

    #[test]
    fn test_five_objective_scenario() {
        let graph = Scenario::default().build_graph().unwrap();
        let search = PrioritySearch::new(&graph);
        let start = graph.find("Start").unwrap();
        let goal = graph.find("Goal").unwrap();

        let mut recorder = Recorder::default();
        let report = search.find_route_with(start, goal, &mut recorder).unwrap();
        let route = found(&report);

        assert_eq!(route.names(&graph), vec!["Start", "B", "C", "Goal"]);
        assert_eq!(route.total_cost(), 2 + 3 + 1);

        // Both branches were explored before the goal was popped
        let expanded: Vec<&str> = recorder
            .expanded
            .iter()
            .map(|(id, _)| graph.objective(*id).unwrap().name())
            .collect();
        assert_eq!(expanded, vec!["Start", "B", "A", "C"]);

        // Goal was first reached through A, then improved through C
        let goal_costs: Vec<u64> = recorder
            .relaxed
            .iter()
            .filter(|(id, _)| *id == goal)
            .map(|(_, r)| r.best_cost)
            .collect();
        assert_eq!(goal_costs, vec![9, 6]);

        assert_eq!(report.stats.expanded, 4);
        assert_eq!(report.stats.relaxed, 5);
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = Scenario::default().build_graph().unwrap();
        let start = graph.find("Start").unwrap();

        let report = PrioritySearch::new(&graph).find_route(start, start).unwrap();
        let route = found(&report);
        assert_eq!(route.objectives(), &[start]);
        assert_eq!(route.total_cost(), 0);
        assert_eq!(report.stats.expanded, 0);
    }

    #[test]
    fn test_goal_without_incoming_edges() {
        let mut graph = ObjectiveGraph::new();
        let start = graph.add_objective("Start", 1, 1, 1).unwrap();
        let a = graph.add_objective("A", 5, 5, 5).unwrap();
        let goal = graph.add_objective("Goal", 9, 9, 9).unwrap();
        graph.add_edge(start, a, 4).unwrap();
        graph.add_edge(goal, a, 1).unwrap();

        let report = PrioritySearch::new(&graph).find_route(start, goal).unwrap();
        assert_eq!(report.outcome, RouteOutcome::Unreachable);
        assert!(report.outcome.route().is_none());
        assert_eq!(report.stats.expanded, 2);
    }

    #[test]
    fn test_invalid_query_is_distinct_from_unreachable() {
        let graph = Scenario::default().build_graph().unwrap();
        let other = Scenario::default().build_graph().unwrap();
        let search = PrioritySearch::new(&graph);
        let goal = graph.find("Goal").unwrap();
        let foreign_start = other.find("Start").unwrap();

        assert_eq!(
            search.find_route(foreign_start, goal),
            Err(SearchError::InvalidQuery {
                endpoint: Endpoint::Start,
                reason: QueryProblem::ForeignObjective(foreign_start),
            })
        );

        assert_eq!(
            search.find_route_by_name("Start", "Treasure"),
            Err(SearchError::InvalidQuery {
                endpoint: Endpoint::Goal,
                reason: QueryProblem::UnknownName("Treasure".into()),
            })
        );
    }

    #[test]
    fn test_find_route_by_name() {
        let graph = Scenario::default().build_graph().unwrap();
        let report = PrioritySearch::new(&graph)
            .find_route_by_name("Start", "Goal")
            .unwrap();
        assert_eq!(found(&report).names(&graph), vec!["Start", "B", "C", "Goal"]);
    }

    #[test]
    fn test_priority_bias_can_beat_cheaper_route() {
        // Start -1-> Busy -1-> Goal costs 2, but Busy carries a huge base
        // priority, so Start -5-> Quiet -1-> Goal (cost 6) is popped first.
        let mut graph = ObjectiveGraph::new();
        let start = graph.add_objective("Start", 0, 0, 0).unwrap();
        let busy = graph.add_objective("Busy", 10, 10, 0).unwrap();
        let quiet = graph.add_objective("Quiet", 0, 0, 0).unwrap();
        let goal = graph.add_objective("Goal", 0, 0, 0).unwrap();
        graph.add_edge(start, busy, 1).unwrap();
        graph.add_edge(start, quiet, 5).unwrap();
        graph.add_edge(busy, goal, 1).unwrap();
        graph.add_edge(quiet, goal, 1).unwrap();

        let report = PrioritySearch::new(&graph).find_route(start, goal).unwrap();
        let route = found(&report);
        assert_eq!(route.names(&graph), vec!["Start", "Quiet", "Goal"]);
        assert_eq!(route.total_cost(), 6);
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut graph = ObjectiveGraph::new();
        let start = graph.add_objective("Start", 0, 0, 0).unwrap();
        let peak = graph.add_objective("Peak", 10, 10, 0).unwrap();
        let ford = graph.add_objective("Ford", 0, 0, 0).unwrap();
        let island = graph.add_objective("Island", 0, 0, 0).unwrap();
        graph.add_edge(start, peak, 1).unwrap();
        graph.add_edge(start, ford, 0).unwrap();
        graph.add_edge(ford, peak, 0).unwrap();

        let mut recorder = Recorder::default();
        let report = PrioritySearch::new(&graph)
            .find_route_with(start, island, &mut recorder)
            .unwrap();

        assert_eq!(report.outcome, RouteOutcome::Unreachable);
        assert_eq!(recorder.stale, vec![peak]);
        assert_eq!(report.stats.expanded, 3);
        assert_eq!(report.stats.relaxed, 3);
        assert_eq!(report.stats.stale_skipped, 1);
    }

    #[test]
    fn test_finalized_objective_is_expanded_again_after_improvement() {
        let mut graph = ObjectiveGraph::new();
        let start = graph.add_objective("Start", 0, 0, 0).unwrap();
        let camp = graph.add_objective("Camp", 0, 0, 0).unwrap();
        let tower = graph.add_objective("Tower", 2, 5, 0).unwrap();
        let goal = graph.add_objective("Goal", 0, 0, 50).unwrap();
        graph.add_edge(start, camp, 5).unwrap();
        graph.add_edge(start, tower, 0).unwrap();
        graph.add_edge(tower, camp, 0).unwrap();
        graph.add_edge(camp, goal, 1).unwrap();

        let mut recorder = Recorder::default();
        let report = PrioritySearch::new(&graph)
            .find_route_with(start, goal, &mut recorder)
            .unwrap();

        let camp_expansions: Vec<u64> = recorder
            .expanded
            .iter()
            .filter(|(id, _)| *id == camp)
            .map(|(_, cost)| *cost)
            .collect();
        assert_eq!(camp_expansions, vec![5, 0]);

        let route = found(&report);
        assert_eq!(route.names(&graph), vec!["Start", "Tower", "Camp", "Goal"]);
        assert_eq!(route.total_cost(), 1);
    }

    #[test]
    fn test_zero_cost_cycle_terminates() {
        let mut graph = ObjectiveGraph::new();
        let a = graph.add_objective("A", 1, 1, 1).unwrap();
        let b = graph.add_objective("B", 1, 1, 1).unwrap();
        let c = graph.add_objective("C", 1, 1, 1).unwrap();
        let goal = graph.add_objective("Goal", 1, 1, 1).unwrap();
        graph.add_edge(a, b, 0).unwrap();
        graph.add_edge(b, a, 0).unwrap();
        graph.add_edge(b, c, 0).unwrap();
        graph.add_edge(c, a, 0).unwrap();

        let report = PrioritySearch::new(&graph).find_route(a, goal).unwrap();
        assert_eq!(report.outcome, RouteOutcome::Unreachable);
        assert_eq!(report.stats.expanded, 3);
    }

    #[test]
    fn test_repeated_queries_do_not_leak_state() {
        let graph = Scenario::default().build_graph().unwrap();
        let search = PrioritySearch::new(&graph);
        let start = graph.find("Start").unwrap();
        let b = graph.find("B").unwrap();
        let goal = graph.find("Goal").unwrap();

        let first = search.find_route(start, goal).unwrap();
        let from_b = search.find_route(b, goal).unwrap();
        let second = search.find_route(start, goal).unwrap();

        assert_eq!(first, second);
        assert_eq!(found(&from_b).names(&graph), vec!["B", "C", "Goal"]);
        assert_eq!(found(&from_b).total_cost(), 4);

        // Reverse direction has no edges
        let back = search.find_route(goal, start).unwrap();
        assert_eq!(back.outcome, RouteOutcome::Unreachable);
    }

    #[test]
    fn test_parallel_queries_share_graph() {
        let graph = Scenario::default().build_graph().unwrap();
        let start = graph.find("Start").unwrap();
        let goal = graph.find("Goal").unwrap();
        let expected = PrioritySearch::new(&graph).find_route(start, goal).unwrap();

        let shared = &graph;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || PrioritySearch::new(shared).find_route(start, goal)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }

    /// Random graph with no duplicate edges, so each hop has one cost
    fn random_graph(rng: &mut StdRng) -> ObjectiveGraph {
        let mut graph = ObjectiveGraph::new();
        let count = rng.gen_range(1..12);
        let ids: Vec<ObjectiveId> = (0..count)
            .map(|i| {
                graph
                    .add_objective(
                        format!("N{}", i),
                        rng.gen_range(0..=10),
                        rng.gen_range(0..=10),
                        rng.gen_range(0..=10),
                    )
                    .unwrap()
            })
            .collect();

        let mut pairs = BTreeSet::new();
        for &from in &ids {
            for &to in &ids {
                if rng.gen_bool(0.25) && pairs.insert((from.index(), to.index())) {
                    graph.add_edge(from, to, rng.gen_range(0..20)).unwrap();
                }
            }
        }
        graph
    }

    fn reachable(graph: &ObjectiveGraph, start: ObjectiveId, goal: ObjectiveId) -> bool {
        let mut seen = vec![false; graph.len()];
        let mut queue = VecDeque::from([start]);
        seen[start.index()] = true;
        while let Some(current) = queue.pop_front() {
            if current == goal {
                return true;
            }
            for edge in graph.edges_from(current) {
                if !seen[edge.target.index()] {
                    seen[edge.target.index()] = true;
                    queue.push_back(edge.target);
                }
            }
        }
        false
    }

    #[test]
    fn test_random_graphs_hold_route_properties() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..300 {
            let graph = random_graph(&mut rng);
            let ids: Vec<ObjectiveId> = graph.objectives().map(|o| o.id()).collect();
            let start = ids[rng.gen_range(0..ids.len())];
            let goal = ids[rng.gen_range(0..ids.len())];
            let search = PrioritySearch::new(&graph);

            let mut recorder = Recorder::default();
            let report = search.find_route_with(start, goal, &mut recorder).unwrap();

            // Best costs only ever go down
            let mut last_cost: HashMap<ObjectiveId, u64> = HashMap::new();
            last_cost.insert(start, 0);
            for (id, relaxation) in &recorder.relaxed {
                assert_eq!(relaxation.previous_cost, last_cost.get(id).copied());
                if let Some(previous) = relaxation.previous_cost {
                    assert!(relaxation.best_cost < previous);
                }
                last_cost.insert(*id, relaxation.best_cost);
            }

            match &report.outcome {
                RouteOutcome::Found(route) => {
                    assert!(reachable(&graph, start, goal));
                    assert_eq!(route.start(), start);
                    assert_eq!(route.goal(), goal);

                    let mut sum = 0;
                    for hop in route.objectives().windows(2) {
                        let edge = graph
                            .edges_from(hop[0])
                            .iter()
                            .find(|e| e.target == hop[1])
                            .expect("route hop must follow a real edge");
                        sum += edge.cost;
                    }
                    assert_eq!(route.total_cost(), sum);
                }
                RouteOutcome::Unreachable => {
                    assert!(!reachable(&graph, start, goal));
                }
            }

            // Same query, same answer
            assert_eq!(search.find_route(start, goal).unwrap(), report);
        }
    }
}
