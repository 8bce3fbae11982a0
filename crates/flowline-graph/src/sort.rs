//! Kahn's algorithm over flow graphs.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, instrument, warn};

use crate::graph::{Graph, reachable};
use crate::node::{FlowEdge, FlowNode};
use crate::order::ExecutionOrder;

/// Order every node so that each edge's source precedes its target.
///
/// The queue starts with all nodes that have no incoming edges, in input
/// order; ties are broken by edge input order. Nodes that never become
/// ready are returned as the cyclic tail in input order.
pub fn topological_sort<N: FlowNode, E: FlowEdge>(nodes: &[N], edges: &[E]) -> ExecutionOrder {
  let graph = Graph::build(nodes, edges);
  let seeds = graph.entry_points();
  debug!(seeds = ?seeds, "sorting whole graph");
  kahn(&graph, seeds)
}

/// Order the nodes reachable from `start_node_id`, starting from it.
///
/// Nodes that cannot be reached from the start are left out. Only the start
/// node seeds the queue, so reachable nodes with other unsatisfied
/// dependencies inside the subgraph end up in the cyclic tail.
pub fn topological_sort_from<N: FlowNode, E: FlowEdge>(
  start_node_id: &str,
  nodes: &[N],
  edges: &[E],
) -> ExecutionOrder {
  let full = Graph::build(nodes, edges);
  let reachable = reachable(start_node_id, &full);

  let nodes: Vec<&N> = nodes
    .iter()
    .filter(|n| reachable.contains(n.id()))
    .collect();
  let edges: Vec<&E> = edges
    .iter()
    .filter(|e| reachable.contains(e.source()) && reachable.contains(e.target()))
    .collect();

  let subgraph = Graph::build(&nodes, &edges);
  debug!(
    start = start_node_id,
    reachable = subgraph.len(),
    excluded = full.len() - subgraph.len(),
    "sorting subgraph reachable from start node"
  );
  kahn(&subgraph, vec![start_node_id])
}

/// Compute the order in which a flow's nodes run.
///
/// - no nodes: empty order;
/// - one node: that node, without building a graph;
/// - a node marked as start (the first one if several are): the order of
///   the nodes reachable from it;
/// - otherwise: the order of all nodes.
#[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn execution_order<N: FlowNode, E: FlowEdge>(nodes: &[N], edges: &[E]) -> ExecutionOrder {
  match nodes {
    [] => ExecutionOrder::empty(),
    [only] => ExecutionOrder::from_parts(vec![only.id().to_string()], Vec::new()),
    _ => match nodes.iter().find(|n| n.is_start_node()) {
      Some(start) => topological_sort_from(start.id(), nodes, edges),
      None => topological_sort(nodes, edges),
    },
  }
}

fn kahn<'a>(graph: &'a Graph, seeds: Vec<&'a str>) -> ExecutionOrder {
  let mut in_degree = graph.in_degrees().clone();
  let mut queue: VecDeque<&str> = seeds.into();
  let mut placed: HashSet<&str> = HashSet::with_capacity(graph.len());
  let mut order = Vec::with_capacity(graph.len());

  while let Some(current) = queue.pop_front() {
    // A cycle leading back into a seed can make it ready a second time.
    if !placed.insert(current) {
      continue;
    }
    order.push(current.to_string());

    for next in graph.successors(current) {
      if let Some(degree) = in_degree.get_mut(next.as_str()) {
        *degree = degree.saturating_sub(1);
        if *degree == 0 {
          queue.push_back(next.as_str());
        }
      }
    }
  }

  let cyclic_nodes: Vec<String> = graph
    .node_ids()
    .iter()
    .filter(|id| !placed.contains(id.as_str()))
    .cloned()
    .collect();

  if !cyclic_nodes.is_empty() {
    warn!(
      ordered = order.len(),
      unordered = ?cyclic_nodes,
      "cycle detected, appending remaining nodes in input order"
    );
  }

  ExecutionOrder::from_parts(order, cyclic_nodes)
}
