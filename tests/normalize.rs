//! Tests for the reference normalizer.
mod common;
use common::*;
use seiri::prelude::*;

#[test]
fn test_positional_references_resolve_to_ids() {
    // Scenario: references are 1-based positional indexes as numeric strings.
    let nodes = vec![
        trigger("n1", "2"),
        action("n2", Some("3")),
        end("n3", EndStatus::Success),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(normalized.nodes[0].next_on_success.as_deref(), Some("n2"));
    assert_eq!(normalized.nodes[1].next_on_success.as_deref(), Some("n3"));
    assert!(normalized.warnings.is_empty());

    let validation = validate(&normalized.nodes);
    assert!(validation.is_valid());
    assert!(validation.errors.is_empty());
}

#[test]
fn test_exact_id_wins_over_positional_lookup() {
    // A node literally named "2" must be matched by id, not by position.
    let nodes = vec![
        trigger("start", "2"),
        action("ignored", None),
        action("2", Some("done")),
        end("done", EndStatus::Success),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(normalized.nodes[0].next_on_success.as_deref(), Some("2"));
    assert!(normalized.warnings.is_empty());
}

#[test]
fn test_correlation_id_resolves() {
    let mut nodes = vec![
        trigger("start", "db-4711"),
        action("persist", Some("done")),
        end("done", EndStatus::Success),
    ];
    nodes[1].correlation_id = Some("db-4711".to_string());

    let normalized = normalize_references(nodes);

    assert_eq!(
        normalized.nodes[0].next_on_success.as_deref(),
        Some("persist")
    );
    assert!(normalized.warnings.is_empty());
}

#[test]
fn test_substring_match_is_flagged() {
    let nodes = vec![
        trigger("start", "send_mail"),
        action("send_mail_to_customer", Some("done")),
        end("done", EndStatus::Success),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(
        normalized.nodes[0].next_on_success.as_deref(),
        Some("send_mail_to_customer")
    );
    assert_eq!(normalized.warnings.len(), 1);
    assert_eq!(normalized.warnings[0].code, FindingCode::FuzzyRefMatch);
    assert_eq!(normalized.warnings[0].severity, Severity::Warning);
}

#[test]
fn test_unresolvable_reference_is_cleared_with_warning() {
    let nodes = vec![
        trigger("start", "does_not_exist_anywhere"),
        action("work", Some("done")),
        end("done", EndStatus::Success),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(normalized.nodes[0].next_on_success, None);
    assert_eq!(normalized.warnings.len(), 1);
    assert_eq!(normalized.warnings[0].code, FindingCode::UnresolvedRef);
    // The original value must be recorded for diagnostics.
    assert!(
        normalized.warnings[0]
            .message
            .contains("does_not_exist_anywhere")
    );
}

#[test]
fn test_out_of_range_positional_reference_is_cleared() {
    let nodes = vec![
        trigger("start", "17"),
        action("work", Some("done")),
        end("done", EndStatus::Success),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(normalized.nodes[0].next_on_success, None);
    assert_eq!(normalized.warnings.len(), 1);
    assert_eq!(normalized.warnings[0].code, FindingCode::UnresolvedRef);
}

#[test]
fn test_normalization_is_idempotent() {
    let nodes = vec![
        trigger("start", "2"),
        condition("gate", Some("ship"), Some("failed")),
        action("ship", Some("done")),
        end("done", EndStatus::Success),
        end("failed", EndStatus::Error),
    ];

    let first = normalize_references(nodes);
    let second = normalize_references(first.nodes.clone());

    assert_eq!(first.nodes, second.nodes);
    assert!(second.warnings.is_empty());
}

#[test]
fn test_failure_references_are_normalized_too() {
    let nodes = vec![
        trigger("start", "gate"),
        condition("gate", Some("done"), Some("5")),
        action("unused", None),
        end("done", EndStatus::Success),
        end("failed", EndStatus::Error),
    ];

    let normalized = normalize_references(nodes);

    assert_eq!(
        normalized.nodes[1].next_on_failure.as_deref(),
        Some("failed")
    );
}
