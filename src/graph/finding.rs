use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a finding blocks downstream use of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Closed taxonomy of validation and normalization findings.
///
/// Each code has a stable string form (see [`FindingCode::as_str`]) so
/// callers can match programmatically without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    NoTrigger,
    MultipleTriggers,
    NoSuccessEnd,
    InvalidRef,
    ConditionIncompleteSuccess,
    ConditionIncompleteFailure,
    EndHasOutgoing,
    EndNoStatus,
    TriggerNoOutput,
    NodeNoOutput,
    CycleDetected,
    UnresolvedRef,
    FuzzyRefMatch,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::NoTrigger => "NO_TRIGGER",
            FindingCode::MultipleTriggers => "MULTIPLE_TRIGGERS",
            FindingCode::NoSuccessEnd => "NO_SUCCESS_END",
            FindingCode::InvalidRef => "INVALID_REF",
            FindingCode::ConditionIncompleteSuccess => "CONDITION_INCOMPLETE_SUCCESS",
            FindingCode::ConditionIncompleteFailure => "CONDITION_INCOMPLETE_FAILURE",
            FindingCode::EndHasOutgoing => "END_HAS_OUTGOING",
            FindingCode::EndNoStatus => "END_NO_STATUS",
            FindingCode::TriggerNoOutput => "TRIGGER_NO_OUTPUT",
            FindingCode::NodeNoOutput => "NODE_NO_OUTPUT",
            FindingCode::CycleDetected => "CYCLE_DETECTED",
            FindingCode::UnresolvedRef => "UNRESOLVED_REF",
            FindingCode::FuzzyRefMatch => "FUZZY_REF_MATCH",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validator or normalizer observation about the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    pub code: FindingCode,
    pub message: String,
    /// The node the finding is anchored to, when one exists.
    #[serde(default)]
    pub node_id: Option<String>,
}

impl ValidationFinding {
    pub fn error(code: FindingCode, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            node_id,
        }
    }

    pub fn warning(code: FindingCode, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            node_id,
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}
