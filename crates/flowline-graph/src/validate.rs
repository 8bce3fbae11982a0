use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraphError;
use crate::node::{FlowEdge, FlowNode};
use crate::order::ExecutionOrder;
use crate::sort::execution_order;

/// How strictly node and edge data is checked before ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
  /// Malformed input degrades silently: bad edges are dropped, the first
  /// start node and the first occurrence of a node id win.
  #[default]
  Lenient,
  /// Duplicate ids, dangling edges and multiple start nodes are errors.
  Strict,
}

/// Validates a node/edge set and resolves its execution order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
  mode: ValidationMode,
}

impl Resolver {
  pub fn new(mode: ValidationMode) -> Self {
    Self { mode }
  }

  pub fn strict() -> Self {
    Self::new(ValidationMode::Strict)
  }

  pub fn lenient() -> Self {
    Self::new(ValidationMode::Lenient)
  }

  pub fn mode(&self) -> ValidationMode {
    self.mode
  }

  /// Check the input according to the resolver's mode.
  ///
  /// Lenient mode always succeeds. Strict mode returns the first problem
  /// found by [`Resolver::diagnostics`].
  pub fn validate<N: FlowNode, E: FlowEdge>(&self, nodes: &[N], edges: &[E]) -> Result<(), GraphError> {
    match self.mode {
      ValidationMode::Lenient => Ok(()),
      ValidationMode::Strict => match self.diagnostics(nodes, edges).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
      },
    }
  }

  /// Every structural problem in the input, whatever the mode.
  ///
  /// Reported in this order: duplicate node ids, dangling edges (in edge
  /// order), extra start nodes. Cycles are not structural problems; see
  /// [`ExecutionOrder::into_complete`].
  pub fn diagnostics<N: FlowNode, E: FlowEdge>(&self, nodes: &[N], edges: &[E]) -> Vec<GraphError> {
    let mut problems = Vec::new();

    let mut node_ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
      if !node_ids.insert(node.id()) {
        problems.push(GraphError::DuplicateNode(node.id().to_string()));
      }
    }

    for edge in edges {
      if !node_ids.contains(edge.source()) {
        problems.push(GraphError::UnknownEdgeSource {
          from: edge.source().to_string(),
          to: edge.target().to_string(),
        });
      } else if !node_ids.contains(edge.target()) {
        problems.push(GraphError::UnknownEdgeTarget {
          from: edge.source().to_string(),
          to: edge.target().to_string(),
        });
      }
    }

    let mut starts = nodes.iter().filter(|n| n.is_start_node());
    if let Some(first) = starts.next() {
      for extra in starts {
        problems.push(GraphError::MultipleStartNodes {
          first: first.id().to_string(),
          second: extra.id().to_string(),
        });
      }
    }

    if !problems.is_empty() {
      debug!(count = problems.len(), "flow graph has structural problems");
    }

    problems
  }

  /// Validate, then compute the execution order.
  pub fn resolve<N: FlowNode, E: FlowEdge>(
    &self,
    nodes: &[N],
    edges: &[E],
  ) -> Result<ExecutionOrder, GraphError> {
    self.validate(nodes, edges)?;
    Ok(execution_order(nodes, edges))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Step {
    id: &'static str,
    start: bool,
  }

  impl FlowNode for Step {
    fn id(&self) -> &str {
      self.id
    }

    fn is_start_node(&self) -> bool {
      self.start
    }
  }

  fn step(id: &'static str) -> Step {
    Step { id, start: false }
  }

  fn start(id: &'static str) -> Step {
    Step { id, start: true }
  }

  #[test]
  fn test_lenient_accepts_dangling_edges() {
    let resolver = Resolver::default();
    let nodes = [step("a"), step("b")];
    let edges = [("a", "b"), ("b", "ghost"), ("ghost", "a")];

    assert_eq!(resolver.mode(), ValidationMode::Lenient);
    assert!(resolver.validate(&nodes, &edges).is_ok());
    assert_eq!(
      resolver.resolve(&nodes, &edges).unwrap().into_ids(),
      vec!["a", "b"]
    );
  }

  #[test]
  fn test_strict_rejects_unknown_target() {
    let nodes = [step("a"), step("b")];
    let err = Resolver::strict()
      .resolve(&nodes, &[("a", "b"), ("b", "ghost")])
      .unwrap_err();

    assert_eq!(
      err,
      GraphError::UnknownEdgeTarget {
        from: "b".to_string(),
        to: "ghost".to_string(),
      }
    );
  }

  #[test]
  fn test_strict_rejects_unknown_source() {
    let nodes = [step("a")];
    let err = Resolver::strict()
      .validate(&nodes, &[("ghost", "a")])
      .unwrap_err();

    assert!(matches!(err, GraphError::UnknownEdgeSource { .. }));
  }

  #[test]
  fn test_strict_rejects_duplicate_ids() {
    let nodes = [step("a"), step("b"), step("a")];
    let err = Resolver::strict()
      .validate(&nodes, &[] as &[(&str, &str)])
      .unwrap_err();

    assert_eq!(err, GraphError::DuplicateNode("a".to_string()));
  }

  #[test]
  fn test_strict_rejects_multiple_start_nodes() {
    let nodes = [step("a"), start("b"), start("c")];
    let err = Resolver::strict()
      .validate(&nodes, &[("b", "a")])
      .unwrap_err();

    assert_eq!(
      err,
      GraphError::MultipleStartNodes {
        first: "b".to_string(),
        second: "c".to_string(),
      }
    );
  }

  #[test]
  fn test_lenient_uses_first_start_node() {
    let nodes = [step("a"), start("b"), start("c")];
    let order = Resolver::lenient()
      .resolve(&nodes, &[("b", "a"), ("c", "a")])
      .unwrap();

    assert_eq!(order.into_ids(), vec!["b", "a"]);
  }

  #[test]
  fn test_strict_allows_cycles() {
    let nodes = [step("a"), step("b")];
    let order = Resolver::strict()
      .resolve(&nodes, &[("a", "b"), ("b", "a")])
      .unwrap();

    assert!(!order.is_complete());
  }

  #[test]
  fn test_diagnostics_collects_everything() {
    let nodes = [start("a"), step("a"), start("b")];
    let edges = [("a", "b"), ("x", "a"), ("b", "y")];
    let problems = Resolver::lenient().diagnostics(&nodes, &edges);

    assert_eq!(
      problems,
      vec![
        GraphError::DuplicateNode("a".to_string()),
        GraphError::UnknownEdgeSource {
          from: "x".to_string(),
          to: "a".to_string(),
        },
        GraphError::UnknownEdgeTarget {
          from: "b".to_string(),
          to: "y".to_string(),
        },
        GraphError::MultipleStartNodes {
          first: "a".to_string(),
          second: "b".to_string(),
        },
      ]
    );
  }
}
