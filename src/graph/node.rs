use serde::{Deserialize, Serialize};

use crate::graph::finding::{FindingCode, ValidationFinding};

/// Structural role of a node. Richer UI-facing subtypes ("webhook",
/// "httpRequest", ...) all reduce to one of these five for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Trigger,
    Action,
    Condition,
    End,
    Subflow,
}

/// Outcome a terminal node resolves the flow to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndStatus {
    Success,
    Error,
}

/// Layout lane hint, independent of the structural role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathClass {
    #[default]
    Main,
    Error,
    Alternative,
}

/// The permissive, in-pipeline node shape.
///
/// Every field combination is representable here on purpose: the validator
/// must be able to see an `End` node carrying an outgoing reference, and the
/// repairer must be able to rewrite it. The validated output shape is
/// [`SymbolicNode`], where those states no longer exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftNode {
    pub id: String,
    pub kind: NodeKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Reference to the follow-up node. May still be a positional index or
    /// garbage before normalization.
    #[serde(default)]
    pub next_on_success: Option<String>,
    /// Failure branch reference. Only meaningful on `Condition` nodes.
    #[serde(default)]
    pub next_on_failure: Option<String>,
    #[serde(default)]
    pub end_status: Option<EndStatus>,
    #[serde(default)]
    pub path_class: PathClass,
    /// External identifier carried through unchanged for the caller.
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Free-text connection type or label attached by the upstream domain,
    /// consumed by the edge synthesizer.
    #[serde(default)]
    pub link_hint: Option<String>,
}

impl DraftNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: String::new(),
            next_on_success: None,
            next_on_failure: None,
            end_status: None,
            path_class: PathClass::default(),
            correlation_id: None,
            link_hint: None,
        }
    }

    pub fn has_outgoing(&self) -> bool {
        self.next_on_success.is_some() || self.next_on_failure.is_some()
    }

    pub fn is_end_with(&self, status: EndStatus) -> bool {
        self.kind == NodeKind::End && self.end_status == Some(status)
    }
}

/// Role-dependent data of a validated node. Each variant carries only the
/// fields meaningful to it, so an `End` with an outgoing edge or a
/// half-branched `Condition` cannot exist in a converged graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Trigger { next: String },
    Action { next: Option<String> },
    Condition { on_success: String, on_failure: String },
    End { status: EndStatus },
    Subflow { next: Option<String> },
}

impl NodeRole {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRole::Trigger { .. } => NodeKind::Trigger,
            NodeRole::Action { .. } => NodeKind::Action,
            NodeRole::Condition { .. } => NodeKind::Condition,
            NodeRole::End { .. } => NodeKind::End,
            NodeRole::Subflow { .. } => NodeKind::Subflow,
        }
    }
}

/// A validated graph vertex, identified by a stable string id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub role: NodeRole,
    #[serde(default)]
    pub path_class: PathClass,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl SymbolicNode {
    /// Converts a draft into the validated shape.
    ///
    /// Callers run this only after validation reported zero errors; a draft
    /// that still violates its role's invariants comes back as the finding
    /// the validator would have raised for it.
    pub fn from_draft(draft: DraftNode) -> Result<Self, ValidationFinding> {
        let role = match draft.kind {
            NodeKind::Trigger => match draft.next_on_success.clone() {
                Some(next) => NodeRole::Trigger { next },
                None => {
                    return Err(ValidationFinding::error(
                        FindingCode::TriggerNoOutput,
                        format!("Trigger node '{}' has no outgoing reference", draft.id),
                        Some(draft.id),
                    ));
                }
            },
            NodeKind::Action => NodeRole::Action {
                next: draft.next_on_success.clone(),
            },
            NodeKind::Condition => {
                match (draft.next_on_success.clone(), draft.next_on_failure.clone()) {
                    (Some(on_success), Some(on_failure)) => NodeRole::Condition {
                        on_success,
                        on_failure,
                    },
                    (None, _) => {
                        return Err(ValidationFinding::error(
                            FindingCode::ConditionIncompleteSuccess,
                            format!("Condition node '{}' is missing its success branch", draft.id),
                            Some(draft.id),
                        ));
                    }
                    (_, None) => {
                        return Err(ValidationFinding::error(
                            FindingCode::ConditionIncompleteFailure,
                            format!("Condition node '{}' is missing its failure branch", draft.id),
                            Some(draft.id),
                        ));
                    }
                }
            }
            NodeKind::End => {
                if draft.has_outgoing() {
                    return Err(ValidationFinding::error(
                        FindingCode::EndHasOutgoing,
                        format!("End node '{}' still carries an outgoing reference", draft.id),
                        Some(draft.id),
                    ));
                }
                match draft.end_status {
                    Some(status) => NodeRole::End { status },
                    None => {
                        return Err(ValidationFinding::error(
                            FindingCode::EndNoStatus,
                            format!("End node '{}' has no end status", draft.id),
                            Some(draft.id),
                        ));
                    }
                }
            }
            NodeKind::Subflow => NodeRole::Subflow {
                next: draft.next_on_success.clone(),
            },
        };

        Ok(Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            role,
            path_class: draft.path_class,
            correlation_id: draft.correlation_id,
        })
    }
}
