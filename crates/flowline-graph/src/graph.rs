use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::node::{FlowEdge, FlowNode};

/// Graph structure for traversal and ordering.
///
/// Built fresh from a node list and an edge list; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
  /// Node ids in input order, first occurrence only.
  node_ids: Vec<String>,
  /// Adjacency list: node_id -> downstream node_ids, in edge input order.
  adjacency: HashMap<String, Vec<String>>,
  /// Number of incoming edges from known nodes.
  in_degree: HashMap<String, usize>,
  /// Edges dropped because an endpoint is not a known node.
  skipped_edges: Vec<(String, String)>,
}

impl Graph {
  /// Build a graph from nodes and edges.
  ///
  /// Edges whose source or target is not in `nodes` are skipped and recorded
  /// in [`Graph::skipped_edges`]. Repeated node ids keep their first position.
  pub fn build<N: FlowNode, E: FlowEdge>(nodes: &[N], edges: &[E]) -> Self {
    let mut node_ids = Vec::with_capacity(nodes.len());
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::with_capacity(nodes.len());
    let mut in_degree: HashMap<String, usize> = HashMap::with_capacity(nodes.len());

    // Initialize all nodes
    for node in nodes {
      let id = node.id();
      if adjacency.contains_key(id) {
        continue;
      }
      node_ids.push(id.to_string());
      adjacency.insert(id.to_string(), Vec::new());
      in_degree.insert(id.to_string(), 0);
    }

    let mut skipped_edges = Vec::new();
    for edge in edges {
      let (from, to) = (edge.source(), edge.target());
      if !in_degree.contains_key(to) {
        skipped_edges.push((from.to_string(), to.to_string()));
        continue;
      }
      let Some(downstream) = adjacency.get_mut(from) else {
        skipped_edges.push((from.to_string(), to.to_string()));
        continue;
      };
      downstream.push(to.to_string());
      if let Some(degree) = in_degree.get_mut(to) {
        *degree += 1;
      }
    }

    if !skipped_edges.is_empty() {
      debug!(
        skipped = skipped_edges.len(),
        edges = ?skipped_edges,
        "skipped edges with unknown endpoints"
      );
    }

    Self {
      node_ids,
      adjacency,
      in_degree,
      skipped_edges,
    }
  }

  /// Node ids in input order.
  pub fn node_ids(&self) -> &[String] {
    &self.node_ids
  }

  pub fn len(&self) -> usize {
    self.node_ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.node_ids.is_empty()
  }

  pub fn contains(&self, node_id: &str) -> bool {
    self.adjacency.contains_key(node_id)
  }

  /// Get downstream nodes for a given node.
  pub fn successors(&self, node_id: &str) -> &[String] {
    self
      .adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Number of incoming edges, or `None` for an unknown node.
  pub fn in_degree(&self, node_id: &str) -> Option<usize> {
    self.in_degree.get(node_id).copied()
  }

  /// Nodes with no incoming edges, in input order.
  pub fn entry_points(&self) -> Vec<&str> {
    self
      .node_ids
      .iter()
      .filter(|id| self.in_degree.get(id.as_str()) == Some(&0))
      .map(|id| id.as_str())
      .collect()
  }

  /// Edges dropped while building, as `(source, target)` pairs.
  pub fn skipped_edges(&self) -> &[(String, String)] {
    &self.skipped_edges
  }

  pub(crate) fn in_degrees(&self) -> &HashMap<String, usize> {
    &self.in_degree
  }
}

/// Ids reachable from `start` following edges forward, in BFS discovery order.
///
/// `start` is always the first element, even when it is not in the graph.
pub fn reachable_in_order(start: &str, graph: &Graph) -> Vec<String> {
  let mut visited: HashSet<&str> = HashSet::new();
  let mut discovered = vec![start.to_string()];
  let mut queue = VecDeque::from([start]);
  visited.insert(start);

  while let Some(current) = queue.pop_front() {
    for next in graph.successors(current) {
      if visited.insert(next.as_str()) {
        discovered.push(next.clone());
        queue.push_back(next.as_str());
      }
    }
  }

  discovered
}

/// The set of ids reachable from `start`, including `start` itself.
pub fn reachable(start: &str, graph: &Graph) -> HashSet<String> {
  reachable_in_order(start, graph).into_iter().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_build_adjacency_and_in_degree() {
    let graph = Graph::build(&["a", "b", "c"], &[("a", "b"), ("a", "c"), ("b", "c")]);

    assert_eq!(graph.node_ids(), ["a", "b", "c"]);
    assert_eq!(graph.successors("a"), ["b", "c"]);
    assert!(graph.successors("c").is_empty());
    assert_eq!(graph.in_degree("a"), Some(0));
    assert_eq!(graph.in_degree("c"), Some(2));
    assert_eq!(graph.entry_points(), vec!["a"]);
  }

  #[test]
  fn test_successors_follow_edge_order() {
    let graph = Graph::build(&["a", "b", "c"], &[("a", "c"), ("a", "b")]);
    assert_eq!(graph.successors("a"), ["c", "b"]);
  }

  #[test]
  fn test_unknown_source_is_skipped() {
    let graph = Graph::build(&["a", "b"], &[("ghost", "b"), ("a", "b")]);

    assert_eq!(graph.in_degree("b"), Some(1));
    assert!(!graph.contains("ghost"));
    assert_eq!(
      graph.skipped_edges(),
      [("ghost".to_string(), "b".to_string())]
    );
  }

  #[test]
  fn test_unknown_target_is_skipped() {
    let graph = Graph::build(&["a", "b"], &[("a", "ghost"), ("a", "b")]);

    assert_eq!(graph.successors("a"), ["b"]);
    assert_eq!(graph.in_degree("ghost"), None);
    assert_eq!(graph.skipped_edges().len(), 1);
  }

  #[test]
  fn test_duplicate_node_ids_keep_first_position() {
    let graph = Graph::build(&["a", "b", "a"], &[] as &[(&str, &str)]);

    assert_eq!(graph.node_ids(), ["a", "b"]);
    assert_eq!(graph.len(), 2);
  }

  #[test]
  fn test_build_is_idempotent() {
    let nodes = ["a", "b", "c", "d"];
    let edges = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("x", "a")];

    assert_eq!(Graph::build(&nodes, &edges), Graph::build(&nodes, &edges));
  }

  #[test]
  fn test_reachable_follows_edges_forward() {
    let graph = Graph::build(
      &["a", "b", "c", "d", "e"],
      &[("a", "b"), ("b", "c"), ("d", "a"), ("c", "a")],
    );

    assert_eq!(reachable_in_order("a", &graph), vec!["a", "b", "c"]);
    let set = reachable("b", &graph);
    assert_eq!(set.len(), 3);
    assert!(!set.contains("d"));
    assert!(!set.contains("e"));
  }

  #[test]
  fn test_reachable_unknown_start_is_singleton() {
    let graph = Graph::build(&["a"], &[] as &[(&str, &str)]);
    let set = reachable("zzz", &graph);

    assert_eq!(set.len(), 1);
    assert!(set.contains("zzz"));
  }
}
