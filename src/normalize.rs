//! Reference normalization.
//!
//! Upstream synthesis emits node references that may be a real id, a 1-based
//! positional index encoded as a numeric string, a correlation id from a
//! previous round-trip, or garbage. This pass rewrites every reference to a
//! canonical node id or clears it, and reports what it could not resolve.
//! It never fabricates nodes, and running it on an already-normalized graph
//! changes nothing.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};

use crate::graph::{DraftNode, FindingCode, ValidationFinding};

/// Result of a normalization pass.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub nodes: Vec<DraftNode>,
    pub warnings: Vec<ValidationFinding>,
}

/// Resolves the `next_on_success` / `next_on_failure` fields of every node.
///
/// Resolution order per reference: exact id match, then the lookup table
/// (1-based position, correlation id), then a substring fallback against
/// known ids. Substring hits are flagged with
/// [`FindingCode::FuzzyRefMatch`]; references that resolve nowhere are
/// cleared and flagged with [`FindingCode::UnresolvedRef`], keeping the
/// original value in the message.
pub fn normalize_references(mut nodes: Vec<DraftNode>) -> Normalized {
    let canonical: AHashSet<String> = nodes.iter().map(|node| node.id.clone()).collect();

    // Positions and correlation ids map to canonical ids. Earlier nodes win
    // on key collisions; a key equal to a real id is never consulted because
    // exact matches are checked first.
    let mut table: AHashMap<String, String> = AHashMap::with_capacity(nodes.len() * 2);
    for (position, node) in nodes.iter().enumerate() {
        table
            .entry((position + 1).to_string())
            .or_insert_with(|| node.id.clone());
        if let Some(correlation) = &node.correlation_id {
            table
                .entry(correlation.clone())
                .or_insert_with(|| node.id.clone());
        }
    }

    let sequence: Vec<String> = nodes.iter().map(|node| node.id.clone()).collect();
    let mut warnings = Vec::new();

    for node in &mut nodes {
        for field in [RefField::Success, RefField::Failure] {
            let Some(value) = field.get(node).map(str::to_owned) else {
                continue;
            };
            if canonical.contains(&value) {
                continue;
            }
            let resolved = resolve_indirect(&value, &table, &sequence, node, &mut warnings);
            match &resolved {
                Some(id) => debug!(
                    node = %node.id,
                    field = field.name(),
                    from = %value,
                    to = %id,
                    "resolved reference"
                ),
                None => {
                    warn!(
                        node = %node.id,
                        field = field.name(),
                        value = %value,
                        "cleared unresolvable reference"
                    );
                    warnings.push(ValidationFinding::warning(
                        FindingCode::UnresolvedRef,
                        format!(
                            "Cleared {} reference '{}' on node '{}': no matching node",
                            field.name(),
                            value,
                            node.id
                        ),
                        Some(node.id.clone()),
                    ));
                }
            }
            field.set(node, resolved);
        }
    }

    Normalized { nodes, warnings }
}

/// Non-exact resolution: lookup table first, then the substring heuristic
/// for non-numeric values. Numeric values that miss the table are simply out
/// of range and stay unresolved.
fn resolve_indirect(
    value: &str,
    table: &AHashMap<String, String>,
    sequence: &[String],
    node: &DraftNode,
    warnings: &mut Vec<ValidationFinding>,
) -> Option<String> {
    if let Some(id) = table.get(value) {
        return Some(id.clone());
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let matched = fuzzy_match(value, sequence)?;
    warnings.push(ValidationFinding::warning(
        FindingCode::FuzzyRefMatch,
        format!(
            "Reference '{}' on node '{}' resolved to '{}' by substring match",
            value, node.id, matched
        ),
        Some(node.id.clone()),
    ));
    Some(matched.to_owned())
}

/// Last-resort substring comparison against known ids, case-insensitive.
/// The first match in node-sequence order wins; tie behavior is undefined
/// and every hit is reported, which is why callers treat this as a flagged
/// heuristic rather than a resolution guarantee.
fn fuzzy_match<'a>(value: &str, sequence: &'a [String]) -> Option<&'a str> {
    let needle = value.to_ascii_lowercase();
    // Single characters are not enough signal to match on.
    if needle.len() < 2 {
        return None;
    }
    sequence
        .iter()
        .find(|id| {
            let hay = id.to_ascii_lowercase();
            hay.contains(&needle) || needle.contains(&hay)
        })
        .map(String::as_str)
}

#[derive(Clone, Copy)]
enum RefField {
    Success,
    Failure,
}

impl RefField {
    fn name(self) -> &'static str {
        match self {
            RefField::Success => "success",
            RefField::Failure => "failure",
        }
    }

    fn get(self, node: &DraftNode) -> Option<&str> {
        match self {
            RefField::Success => node.next_on_success.as_deref(),
            RefField::Failure => node.next_on_failure.as_deref(),
        }
    }

    fn set(self, node: &mut DraftNode, value: Option<String>) {
        match self {
            RefField::Success => node.next_on_success = value,
            RefField::Failure => node.next_on_failure = value,
        }
    }
}
