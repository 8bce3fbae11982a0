use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
  pub id: String,
  pub data: NodeData,
}

impl NodeDef {
  /// Whether the editor marked this node as the flow's start.
  pub fn is_start_node(&self) -> bool {
    self.data.is_start_node.unwrap_or(false)
  }
}

/// Per-node payload as stored by the flow editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
  /// Marks the node execution starts from. Only the first marked node counts.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_start_node: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(flatten)]
  pub step: StepKind,
}

impl NodeData {
  pub fn new(step: StepKind) -> Self {
    Self {
      is_start_node: None,
      label: None,
      step,
    }
  }

  pub fn start(step: StepKind) -> Self {
    Self {
      is_start_node: Some(true),
      label: None,
      step,
    }
  }
}

/// A single input collected by a form step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(default)]
  pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
  /// Collects user input.
  Form {
    #[serde(default)]
    fields: Vec<FormField>,
  },
  /// Sends a templated prompt to a language model.
  LlmPrompt {
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
  },
  /// Renders a built-in theme widget.
  Widget {
    widget: String,
    #[serde(default)]
    props: serde_json::Map<String, serde_json::Value>,
  },
  /// Rendered by a step plugin registered under `renderer`.
  Custom {
    renderer: String,
    #[serde(default)]
    config: serde_json::Value,
  },
}

impl StepKind {
  /// Short name of the step kind, matching its `type` tag.
  pub fn kind_name(&self) -> &'static str {
    match self {
      StepKind::Form { .. } => "form",
      StepKind::LlmPrompt { .. } => "llm_prompt",
      StepKind::Widget { .. } => "widget",
      StepKind::Custom { .. } => "custom",
    }
  }
}
