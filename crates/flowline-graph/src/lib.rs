//! Flowline Graph
//!
//! Computes the order in which the steps of a flow run.
//!
//! The resolver takes a node list and a directed edge list and produces a
//! deterministic linear order that respects every dependency it can:
//! - with a node marked `isStartNode`, only the steps reachable from it are
//!   ordered, starting from that node;
//! - otherwise every node is ordered, starting from all nodes with no
//!   incoming edges;
//! - nodes caught in (or behind) a cycle are appended in input order and
//!   reported separately through [`ExecutionOrder::Partial`].
//!
//! Everything here is synchronous and pure: each call builds its own
//! [`Graph`] and drops it on return.

mod error;
mod flow;
mod graph;
mod node;
mod order;
mod plan;
mod sort;
mod validate;

pub use error::GraphError;
pub use flow::Flow;
pub use graph::{Graph, reachable, reachable_in_order};
pub use node::{FlowEdge, FlowNode};
pub use order::ExecutionOrder;
pub use plan::ExecutionPlan;
pub use sort::{execution_order, topological_sort, topological_sort_from};
pub use validate::{Resolver, ValidationMode};
