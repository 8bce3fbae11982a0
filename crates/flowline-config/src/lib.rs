//! Flowline Config
//!
//! This crate contains the serializable flow definition types for Flowline.
//! A flow is a graph of steps (forms, LLM prompts, widgets, plugin-rendered
//! steps) authored in a flow editor and stored as JSON.
//!
//! Definitions can be loaded from:
//! - JSON files (via the CLI with `flowline order flow.json`)
//! - Any JSON string (e.g. a document fetched from storage)
//!
//! `flowline-graph` takes these types and computes the order in which steps run.

mod edge;
mod error;
mod flow;
mod node;

pub use edge::EdgeDef;
pub use error::ConfigError;
pub use flow::FlowDef;
pub use node::{FormField, NodeData, NodeDef, StepKind};
