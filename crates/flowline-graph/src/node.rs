//! Seams between the resolver and whatever node/edge types a caller holds.

use flowline_config::{EdgeDef, NodeDef};

/// A node the resolver can order.
pub trait FlowNode {
  fn id(&self) -> &str;

  /// Whether this node roots the execution order.
  fn is_start_node(&self) -> bool {
    false
  }
}

/// A directed edge between two node ids.
pub trait FlowEdge {
  fn source(&self) -> &str;
  fn target(&self) -> &str;
}

impl<T: FlowNode + ?Sized> FlowNode for &T {
  fn id(&self) -> &str {
    (**self).id()
  }

  fn is_start_node(&self) -> bool {
    (**self).is_start_node()
  }
}

impl<T: FlowEdge + ?Sized> FlowEdge for &T {
  fn source(&self) -> &str {
    (**self).source()
  }

  fn target(&self) -> &str {
    (**self).target()
  }
}

impl FlowNode for NodeDef {
  fn id(&self) -> &str {
    &self.id
  }

  fn is_start_node(&self) -> bool {
    NodeDef::is_start_node(self)
  }
}

impl FlowEdge for EdgeDef {
  fn source(&self) -> &str {
    &self.source
  }

  fn target(&self) -> &str {
    &self.target
  }
}

impl FlowEdge for (String, String) {
  fn source(&self) -> &str {
    &self.0
  }

  fn target(&self) -> &str {
    &self.1
  }
}

impl FlowEdge for (&str, &str) {
  fn source(&self) -> &str {
    self.0
  }

  fn target(&self) -> &str {
    self.1
  }
}

impl FlowNode for str {
  fn id(&self) -> &str {
    self
  }
}

impl FlowNode for String {
  fn id(&self) -> &str {
    self
  }
}
