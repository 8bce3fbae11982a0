use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::edge::EdgeDef;
use crate::error::ConfigError;
use crate::node::NodeDef;

/// A flow as authored in the editor: steps plus the edges between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDef {
  pub flow_id: String,
  pub name: String,
  #[serde(default)]
  pub nodes: Vec<NodeDef>,
  #[serde(default)]
  pub edges: Vec<EdgeDef>,
}

impl FlowDef {
  /// Parse a flow definition from a JSON document.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Read and parse a flow definition file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_json(&content)
  }

  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&NodeDef> {
    self.nodes.iter().find(|n| n.id == node_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  const ONBOARDING: &str = r#"{
    "flowId": "onboarding",
    "name": "Onboarding",
    "nodes": [
      { "id": "welcome", "data": { "isStartNode": true, "type": "widget", "widget": "hero" } },
      { "id": "details", "data": { "type": "form", "fields": [{ "name": "company" }] } },
      { "id": "pitch", "data": { "type": "llm_prompt", "prompt": "Write a pitch for {{ company }}" } }
    ],
    "edges": [
      { "id": "e1", "source": "welcome", "target": "details" },
      { "source": "details", "target": "pitch" }
    ]
  }"#;

  #[test]
  fn test_from_json() {
    let flow = FlowDef::from_json(ONBOARDING).unwrap();

    assert_eq!(flow.flow_id, "onboarding");
    assert_eq!(flow.nodes.len(), 3);
    assert_eq!(flow.edges[0].id.as_deref(), Some("e1"));
    assert_eq!(flow.edges[1], EdgeDef::new("details", "pitch"));
    assert!(flow.get_node("welcome").unwrap().is_start_node());
    assert!(flow.get_node("missing").is_none());
  }

  #[test]
  fn test_missing_collections_default_to_empty() {
    let flow = FlowDef::from_json(r#"{ "flowId": "f", "name": "Empty" }"#).unwrap();

    assert!(flow.nodes.is_empty());
    assert!(flow.edges.is_empty());
  }

  #[test]
  fn test_invalid_json_is_parse_error() {
    let err = FlowDef::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ONBOARDING.as_bytes()).unwrap();

    let flow = FlowDef::load(file.path()).unwrap();
    assert_eq!(flow.name, "Onboarding");
  }

  #[test]
  fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FlowDef::load(dir.path().join("nope.json")).unwrap_err();

    match err {
      ConfigError::Io { path, .. } => assert!(path.ends_with("nope.json")),
      other => panic!("expected io error, got {:?}", other),
    }
  }
}
