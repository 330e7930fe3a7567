//! Edge synthesis.
//!
//! Turns each node's resolved references into directed [`Connection`]
//! records. Connections come out in node-sequence order, success edge before
//! failure edge, which downstream layout relies on for determinism.

use crate::graph::{Connection, ConnectionKind, DraftNode, NodeKind};

/// Affirmative marker on a condition's success branch.
const LABEL_AFFIRMATIVE: &str = "Yes";
/// Negative marker on a condition's failure branch.
const LABEL_NEGATIVE: &str = "No";

/// Synthesizes the connection list for a validated node sequence.
///
/// Condition branches carry fixed semantics: the success reference becomes a
/// `Conditional` edge labeled affirmatively, the failure reference an
/// `Error` edge labeled negatively. Other nodes emit a `Success` edge for
/// their success reference, reclassified by an upstream link hint when one
/// matches the canonical vocabulary.
pub fn synthesize_connections(nodes: &[DraftNode]) -> Vec<Connection> {
    let mut connections = Vec::new();

    for node in nodes {
        if let Some(target) = &node.next_on_success {
            if node.kind == NodeKind::Condition {
                connections.push(Connection {
                    source_id: node.id.clone(),
                    target_id: target.clone(),
                    kind: ConnectionKind::Conditional,
                    label: Some(LABEL_AFFIRMATIVE.to_owned()),
                });
            } else {
                connections.push(success_connection(node, target));
            }
        }
        if node.kind == NodeKind::Condition {
            if let Some(target) = &node.next_on_failure {
                connections.push(Connection {
                    source_id: node.id.clone(),
                    target_id: target.clone(),
                    kind: ConnectionKind::Error,
                    label: Some(LABEL_NEGATIVE.to_owned()),
                });
            }
        }
    }

    connections
}

/// Success edge for a non-condition node. A matched link hint picks the
/// classification; unmatched free text is kept as the display label and the
/// edge falls back to `Default`.
fn success_connection(node: &DraftNode, target: &str) -> Connection {
    let (kind, label) = match node.link_hint.as_deref() {
        Some(hint) => match classify_hint(hint) {
            Some(kind) => (kind, None),
            None => (ConnectionKind::Default, Some(hint.to_owned())),
        },
        None => (ConnectionKind::Success, None),
    };
    Connection {
        source_id: node.id.clone(),
        target_id: target.to_owned(),
        kind,
        label,
    }
}

/// Case-insensitive match against the canonical connection-type vocabulary.
pub fn classify_hint(hint: &str) -> Option<ConnectionKind> {
    match hint.trim().to_ascii_lowercase().as_str() {
        "success" | "ok" | "pass" => Some(ConnectionKind::Success),
        "error" | "failure" | "fail" => Some(ConnectionKind::Error),
        "conditional" | "condition" | "branch" => Some(ConnectionKind::Conditional),
        "default" | "fallback" | "else" => Some(ConnectionKind::Default),
        _ => None,
    }
}
