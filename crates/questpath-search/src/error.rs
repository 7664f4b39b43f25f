use std::fmt;

use questpath_graph::ObjectiveId;

/// Which end of a query was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Why an endpoint is not usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryProblem {
    /// No objective with this name exists in the graph.
    UnknownName(String),
    /// The handle was created by a different graph.
    ForeignObjective(ObjectiveId),
}

impl fmt::Display for QueryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryProblem::UnknownName(name) => write!(f, "no objective named '{}'", name),
            QueryProblem::ForeignObjective(id) => {
                write!(f, "{:?} is not a member of the graph", id)
            }
        }
    }
}

/// Errors that reject a search request before it runs.
///
/// An unreachable goal is not an error; see
/// [`RouteOutcome::Unreachable`](crate::RouteOutcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid {endpoint}: {reason}")]
    InvalidQuery {
        endpoint: Endpoint,
        reason: QueryProblem,
    },
}

impl SearchError {
    pub(crate) fn foreign(endpoint: Endpoint, id: ObjectiveId) -> Self {
        SearchError::InvalidQuery {
            endpoint,
            reason: QueryProblem::ForeignObjective(id),
        }
    }

    pub(crate) fn unknown(endpoint: Endpoint, name: &str) -> Self {
        SearchError::InvalidQuery {
            endpoint,
            reason: QueryProblem::UnknownName(name.to_string()),
        }
    }
}
