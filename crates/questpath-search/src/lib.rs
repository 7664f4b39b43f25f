//! Questpath Search - Priority-guided route search
//!
//! Finds a route between two objectives of a
//! [`questpath_graph::ObjectiveGraph`], expanding objectives in order of
//! accumulated travel cost plus their static base priority.
//!
//! The graph is only ever borrowed; per-query bookkeeping lives in an arena
//! owned by the running search.

mod engine;
mod error;
mod frontier;
mod route;
mod state;

pub use engine::{PrioritySearch, SearchEvents, SearchReport, SearchStats};
pub use error::{Endpoint, QueryProblem, SearchError};
pub use frontier::Frontier;
pub use route::{Route, RouteOutcome};
pub use state::Relaxation;
