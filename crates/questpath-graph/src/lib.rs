//! Questpath Graph - Objective graph model
//!
//! This crate provides the static side of objective routing:
//! - Objectives with urgency, proximity weight, and player preference
//! - A derived base priority per objective
//! - Directed, non-negative weighted edges
//! - Scenario descriptions that build a graph from plain data

mod error;
mod graph;
mod objective;
mod scenario;

pub use error::GraphError;
pub use graph::ObjectiveGraph;
pub use objective::{Attributes, Edge, GraphId, Objective, ObjectiveId};
pub use scenario::{AttributeTriple, EdgeSpec, FiveRouteCosts, ObjectiveSpec, Scenario};
