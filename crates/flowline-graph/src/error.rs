use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("duplicate node id: {0}")]
  DuplicateNode(String),

  #[error("edge references unknown source node: from={from}, to={to}")]
  UnknownEdgeSource { from: String, to: String },

  #[error("edge references unknown target node: from={from}, to={to}")]
  UnknownEdgeTarget { from: String, to: String },

  #[error("multiple start nodes: {first} and {second}")]
  MultipleStartNodes { first: String, second: String },

  #[error("cycle detected, unordered nodes: {}", .nodes.join(", "))]
  CycleDetected { nodes: Vec<String> },
}
