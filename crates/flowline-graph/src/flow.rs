use flowline_config::{FlowDef, NodeDef};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::order::ExecutionOrder;
use crate::plan::ExecutionPlan;
use crate::sort::execution_order;
use crate::validate::Resolver;

/// A flow definition paired with the operations that order it.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
  def: FlowDef,
}

impl Flow {
  /// Wrap a definition without checking it.
  pub fn new(def: FlowDef) -> Self {
    Self { def }
  }

  /// Wrap a definition, rejecting duplicate ids, dangling edges and
  /// multiple start nodes.
  pub fn strict(def: FlowDef) -> Result<Self, GraphError> {
    Resolver::strict().validate(&def.nodes, &def.edges)?;
    Ok(Self { def })
  }

  pub fn def(&self) -> &FlowDef {
    &self.def
  }

  pub fn into_def(self) -> FlowDef {
    self.def
  }

  /// Build the graph structure for traversal.
  pub fn graph(&self) -> Graph {
    Graph::build(&self.def.nodes, &self.def.edges)
  }

  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&NodeDef> {
    self.def.get_node(node_id)
  }

  /// The first node marked as start, if any.
  pub fn start_node(&self) -> Option<&NodeDef> {
    self.def.nodes.iter().find(|n| n.is_start_node())
  }

  pub fn execution_order(&self) -> ExecutionOrder {
    execution_order(&self.def.nodes, &self.def.edges)
  }

  pub fn plan(&self) -> ExecutionPlan {
    ExecutionPlan::new(self.execution_order())
  }
}

impl From<FlowDef> for Flow {
  fn from(def: FlowDef) -> Self {
    Self::new(def)
  }
}
