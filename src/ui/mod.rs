//! The upstream synthesis collaborator's payload shape and its conversion
//! into the engine's draft model.
//!
//! The editor exposes richer node subtypes than the engine validates
//! against; [`structural_kind`] reduces each subtype to one of the five
//! structural roles. Optional fields degrade gracefully: empty references
//! become unset, unknown statuses and path classes are left for the
//! validator to flag. Only a missing structural role is a hard conversion
//! error.

pub mod types;

pub use types::*;

use crate::error::ConversionError;
use crate::graph::{DraftNode, EndStatus, IntoSymbolicFlow, NodeKind, PathClass};

/// Reduces a UI-facing kind subtype to its structural role.
pub fn structural_kind(kind: &str) -> Option<NodeKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "trigger" | "webhook" | "schedule" | "manual" | "event" => Some(NodeKind::Trigger),
        "action" | "task" | "httprequest" | "http_request" | "email" | "notification"
        | "transform" => Some(NodeKind::Action),
        "condition" | "if" | "ifcondition" | "if_condition" | "branch" | "switch" | "filter" => {
            Some(NodeKind::Condition)
        }
        "end" | "terminal" | "stop" | "finish" => Some(NodeKind::End),
        "subflow" | "sub_flow" | "loop" | "foreach" | "for_each" => Some(NodeKind::Subflow),
        _ => None,
    }
}

fn parse_end_status(status: &str) -> Option<EndStatus> {
    match status.trim().to_ascii_lowercase().as_str() {
        "success" | "ok" | "done" => Some(EndStatus::Success),
        "error" | "failure" | "failed" => Some(EndStatus::Error),
        _ => None,
    }
}

fn parse_path_class(path_class: &str) -> Option<PathClass> {
    match path_class.trim().to_ascii_lowercase().as_str() {
        "main" | "primary" => Some(PathClass::Main),
        "error" | "failure" => Some(PathClass::Error),
        "alternative" | "alt" | "secondary" => Some(PathClass::Alternative),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl UiNode {
    /// Converts the loose editor shape into a draft node.
    pub fn into_draft(self) -> Result<DraftNode, ConversionError> {
        let kind = structural_kind(&self.kind).ok_or_else(|| ConversionError::UnknownKind {
            node_id: self.id.clone(),
            kind: self.kind.clone(),
        })?;

        Ok(DraftNode {
            id: self.id,
            kind,
            title: self.title,
            description: self.description,
            next_on_success: non_empty(self.next_on_success),
            next_on_failure: non_empty(self.next_on_failure),
            end_status: self.end_status.as_deref().and_then(parse_end_status),
            path_class: self
                .path_class
                .as_deref()
                .and_then(parse_path_class)
                .unwrap_or_default(),
            correlation_id: non_empty(self.correlation_id),
            link_hint: non_empty(self.link_hint),
        })
    }
}

impl IntoSymbolicFlow for UiGraph {
    fn into_symbolic_flow(self) -> Result<Vec<DraftNode>, ConversionError> {
        self.nodes.into_iter().map(UiNode::into_draft).collect()
    }
}
