//! Structural validation.
//!
//! The validator is exhaustive: every check runs regardless of earlier
//! failures, and the result is always a complete finding list. It never
//! rejects a graph outright; blocking problems are errors, everything else
//! is a warning.

use ahash::AHashSet;
use itertools::Itertools;

use crate::graph::{DraftNode, EndStatus, FindingCode, NodeKind, ValidationFinding};

mod cycle;

/// Outcome of a validation run.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    /// Edges that closed a cycle during traversal, as (source, target) ids.
    /// The repairer clears exactly these to break cycles.
    pub back_edges: Vec<(String, String)>,
}

impl Validation {
    /// True iff the error list is empty. Warnings never block.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, code: FindingCode) -> bool {
        self.errors.iter().any(|finding| finding.code == code)
    }
}

/// Runs all invariant checks over a normalized node sequence.
pub fn validate(nodes: &[DraftNode]) -> Validation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_trigger_count(nodes, &mut errors);
    check_success_end(nodes, &mut errors);
    check_references(nodes, &mut errors);
    check_conditions(nodes, &mut errors);
    check_terminals(nodes, &mut errors);
    check_outputs(nodes, &mut errors, &mut warnings);
    let back_edges = cycle::detect_cycles(nodes, &mut errors);

    Validation {
        errors,
        warnings,
        back_edges,
    }
}

fn check_trigger_count(nodes: &[DraftNode], errors: &mut Vec<ValidationFinding>) {
    let triggers: Vec<&str> = nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Trigger)
        .map(|node| node.id.as_str())
        .collect();
    match triggers.len() {
        0 => errors.push(ValidationFinding::error(
            FindingCode::NoTrigger,
            "Graph has no trigger node",
            None,
        )),
        1 => {}
        _ => errors.push(ValidationFinding::error(
            FindingCode::MultipleTriggers,
            format!(
                "Graph has {} trigger nodes: {}",
                triggers.len(),
                triggers.iter().join(", ")
            ),
            None,
        )),
    }
}

fn check_success_end(nodes: &[DraftNode], errors: &mut Vec<ValidationFinding>) {
    if !nodes
        .iter()
        .any(|node| node.is_end_with(EndStatus::Success))
    {
        errors.push(ValidationFinding::error(
            FindingCode::NoSuccessEnd,
            "Graph has no successful end node",
            None,
        ));
    }
}

fn check_references(nodes: &[DraftNode], errors: &mut Vec<ValidationFinding>) {
    let ids: AHashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    for node in nodes {
        for (field, reference) in [
            ("success", node.next_on_success.as_deref()),
            ("failure", node.next_on_failure.as_deref()),
        ] {
            if let Some(target) = reference {
                if !ids.contains(target) {
                    errors.push(ValidationFinding::error(
                        FindingCode::InvalidRef,
                        format!(
                            "Node '{}' references unknown node '{}' on its {} branch",
                            node.id, target, field
                        ),
                        Some(node.id.clone()),
                    ));
                }
            }
        }
    }
}

fn check_conditions(nodes: &[DraftNode], errors: &mut Vec<ValidationFinding>) {
    for node in nodes {
        if node.kind != NodeKind::Condition {
            continue;
        }
        if node.next_on_success.is_none() {
            errors.push(ValidationFinding::error(
                FindingCode::ConditionIncompleteSuccess,
                format!("Condition node '{}' is missing its success branch", node.id),
                Some(node.id.clone()),
            ));
        }
        if node.next_on_failure.is_none() {
            errors.push(ValidationFinding::error(
                FindingCode::ConditionIncompleteFailure,
                format!("Condition node '{}' is missing its failure branch", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}

fn check_terminals(nodes: &[DraftNode], errors: &mut Vec<ValidationFinding>) {
    for node in nodes {
        if node.kind != NodeKind::End {
            continue;
        }
        if node.has_outgoing() {
            errors.push(ValidationFinding::error(
                FindingCode::EndHasOutgoing,
                format!("End node '{}' carries an outgoing reference", node.id),
                Some(node.id.clone()),
            ));
        }
        if node.end_status.is_none() {
            errors.push(ValidationFinding::error(
                FindingCode::EndNoStatus,
                format!("End node '{}' has no end status", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}

fn check_outputs(
    nodes: &[DraftNode],
    errors: &mut Vec<ValidationFinding>,
    warnings: &mut Vec<ValidationFinding>,
) {
    let ids: AHashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    for node in nodes {
        if node.kind == NodeKind::End {
            continue;
        }
        let has_resolvable = [
            node.next_on_success.as_deref(),
            node.next_on_failure.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|target| ids.contains(target));
        if has_resolvable {
            continue;
        }
        if node.kind == NodeKind::Trigger {
            errors.push(ValidationFinding::error(
                FindingCode::TriggerNoOutput,
                format!("Trigger node '{}' has no outgoing edge", node.id),
                Some(node.id.clone()),
            ));
        } else {
            warnings.push(ValidationFinding::warning(
                FindingCode::NodeNoOutput,
                format!("Node '{}' has no outgoing edge", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}
