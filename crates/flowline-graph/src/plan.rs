use std::collections::HashMap;

use crate::order::ExecutionOrder;

/// A resolved execution order prepared for step-by-step walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
  steps: Vec<String>,
  positions: HashMap<String, usize>,
  complete: bool,
}

impl ExecutionPlan {
  pub fn new(order: ExecutionOrder) -> Self {
    let complete = order.is_complete();
    let steps = order.into_ids();
    let positions = steps
      .iter()
      .enumerate()
      .map(|(index, id)| (id.clone(), index))
      .collect();

    Self {
      steps,
      positions,
      complete,
    }
  }

  pub fn steps(&self) -> &[String] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// False if part of the plan was placed without dependency resolution.
  pub fn is_complete(&self) -> bool {
    self.complete
  }

  pub fn first(&self) -> Option<&str> {
    self.steps.first().map(String::as_str)
  }

  pub fn contains(&self, node_id: &str) -> bool {
    self.positions.contains_key(node_id)
  }

  pub fn position(&self, node_id: &str) -> Option<usize> {
    self.positions.get(node_id).copied()
  }

  /// The step that runs after `node_id`.
  pub fn next_after(&self, node_id: &str) -> Option<&str> {
    let index = self.position(node_id)?;
    self.steps.get(index + 1).map(String::as_str)
  }

  /// The step that ran before `node_id`.
  pub fn previous_before(&self, node_id: &str) -> Option<&str> {
    let index = self.position(node_id)?;
    index
      .checked_sub(1)
      .and_then(|prev| self.steps.get(prev))
      .map(String::as_str)
  }
}

impl From<ExecutionOrder> for ExecutionPlan {
  fn from(order: ExecutionOrder) -> Self {
    Self::new(order)
  }
}
