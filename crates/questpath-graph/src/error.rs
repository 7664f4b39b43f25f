use crate::objective::ObjectiveId;

/// Errors that can occur while building an objective graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("objective '{objective}' has negative {attribute}: {value}")]
    InvalidAttribute {
        objective: String,
        attribute: &'static str,
        value: i64,
    },

    #[error("edge {from} -> {to} has negative cost: {cost}")]
    InvalidEdge {
        from: String,
        to: String,
        cost: i64,
    },

    #[error("objective '{0}' already exists")]
    DuplicateObjective(String),

    #[error("unknown objective '{0}'")]
    UnknownObjective(String),

    #[error("graph is full: cannot add objective after {0} existing ones")]
    CapacityExceeded(usize),

    #[error("objective {0:?} does not belong to this graph")]
    ForeignObjective(ObjectiveId),
}
