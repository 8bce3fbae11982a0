use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// The order in which a flow's nodes run.
///
/// `Partial` keeps the dependency-respecting prefix apart from the nodes
/// that never became ready because they sit on, or downstream of, a cycle.
/// Flattening either variant with [`ExecutionOrder::into_ids`] yields the
/// prefix followed by the unordered tail in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOrder {
  Complete {
    order: Vec<String>,
  },
  Partial {
    order: Vec<String>,
    cyclic_nodes: Vec<String>,
  },
}

impl ExecutionOrder {
  pub(crate) fn from_parts(order: Vec<String>, cyclic_nodes: Vec<String>) -> Self {
    if cyclic_nodes.is_empty() {
      ExecutionOrder::Complete { order }
    } else {
      ExecutionOrder::Partial {
        order,
        cyclic_nodes,
      }
    }
  }

  pub fn empty() -> Self {
    ExecutionOrder::Complete { order: Vec::new() }
  }

  pub fn is_complete(&self) -> bool {
    matches!(self, ExecutionOrder::Complete { .. })
  }

  /// The dependency-respecting part of the order.
  pub fn ordered(&self) -> &[String] {
    match self {
      ExecutionOrder::Complete { order } | ExecutionOrder::Partial { order, .. } => order,
    }
  }

  /// Nodes appended without dependency resolution. Empty when complete.
  pub fn cyclic_nodes(&self) -> &[String] {
    match self {
      ExecutionOrder::Complete { .. } => &[],
      ExecutionOrder::Partial { cyclic_nodes, .. } => cyclic_nodes,
    }
  }

  /// All ids in output order.
  pub fn ids(&self) -> impl Iterator<Item = &str> {
    self
      .ordered()
      .iter()
      .chain(self.cyclic_nodes())
      .map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.ordered().len() + self.cyclic_nodes().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains(&self, node_id: &str) -> bool {
    self.ids().any(|id| id == node_id)
  }

  /// Flatten into a single sequence, cyclic tail last.
  pub fn into_ids(self) -> Vec<String> {
    match self {
      ExecutionOrder::Complete { order } => order,
      ExecutionOrder::Partial {
        mut order,
        cyclic_nodes,
      } => {
        order.extend(cyclic_nodes);
        order
      }
    }
  }

  /// The order, or [`GraphError::CycleDetected`] if any node was left unordered.
  pub fn into_complete(self) -> Result<Vec<String>, GraphError> {
    match self {
      ExecutionOrder::Complete { order } => Ok(order),
      ExecutionOrder::Partial { cyclic_nodes, .. } => Err(GraphError::CycleDetected {
        nodes: cyclic_nodes,
      }),
    }
  }
}
