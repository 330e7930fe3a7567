use serde::{Deserialize, Serialize};

/// Semantic category of a synthesized edge. Drives lane placement during
/// layout and visual styling in the rendering layer downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    Success,
    Error,
    Conditional,
    Default,
}

/// A directed edge between two resolved node ids. Derived by the edge
/// synthesizer, never authored directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source_id: String,
    pub target_id: String,
    pub kind: ConnectionKind,
    #[serde(default)]
    pub label: Option<String>,
}
