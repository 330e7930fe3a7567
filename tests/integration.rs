//! End-to-end tests for the full conversion pipeline.
mod common;
use common::*;
use seiri::prelude::*;

const SYNTHESIS_PAYLOAD: &str = r#"{
    "nodes": [
        {
            "id": "n1",
            "kind": "webhook",
            "title": "Order received",
            "nextOnSuccess": "2",
            "correlationId": "wf-101"
        },
        {
            "id": "n2",
            "kind": "action",
            "title": "Reserve stock",
            "nextOnSuccess": "3"
        },
        {
            "id": "n3",
            "kind": "end",
            "title": "Done",
            "endStatus": "success"
        }
    ]
}"#;

fn convert_payload(payload: &str) -> ConversionOutcome {
    let graph: UiGraph = serde_json::from_str(payload).expect("payload parses");
    FlowEngine::builder()
        .build()
        .convert(graph)
        .expect("conversion runs")
}

#[test]
fn test_synthesis_payload_converges() {
    // Scenario: numeric references from the synthesis step resolve and the
    // validator finds nothing to complain about.
    let graph = match convert_payload(SYNTHESIS_PAYLOAD) {
        ConversionOutcome::Converged(graph) => graph,
        ConversionOutcome::Exhausted { report, .. } => {
            panic!("expected convergence, got errors: {:?}", report.errors)
        }
    };

    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.report.errors.is_empty());
    assert!(graph.report.warnings.is_empty());
    assert!(graph.report.fixes_applied.is_empty());

    let targets: Vec<(&str, &str)> = graph
        .connections
        .iter()
        .map(|c| (c.source_id.as_str(), c.target_id.as_str()))
        .collect();
    assert_eq!(targets, vec![("n1", "n2"), ("n2", "n3")]);
    assert_eq!(graph.positions.len(), 3);
}

#[test]
fn test_ui_subtypes_reduce_to_structural_roles() {
    let graph = match convert_payload(SYNTHESIS_PAYLOAD) {
        ConversionOutcome::Converged(graph) => graph,
        _ => panic!("expected convergence"),
    };

    assert_eq!(graph.nodes[0].role.kind(), NodeKind::Trigger);
    assert_eq!(graph.nodes[1].role.kind(), NodeKind::Action);
    assert!(matches!(
        graph.nodes[2].role,
        NodeRole::End {
            status: EndStatus::Success
        }
    ));
}

#[test]
fn test_correlation_ids_are_echoed_unchanged() {
    let graph = match convert_payload(SYNTHESIS_PAYLOAD) {
        ConversionOutcome::Converged(graph) => graph,
        _ => panic!("expected convergence"),
    };

    assert_eq!(graph.nodes[0].correlation_id.as_deref(), Some("wf-101"));
    assert_eq!(graph.nodes[1].correlation_id, None);
}

#[test]
fn test_unknown_ui_kind_is_a_conversion_error() {
    let payload = r#"{
        "nodes": [
            {"id": "n1", "kind": "quantum_portal", "title": "???"}
        ]
    }"#;
    let graph: UiGraph = serde_json::from_str(payload).expect("payload parses");

    let result = FlowEngine::builder().build().convert(graph);
    match result {
        Err(EngineError::Conversion(ConversionError::UnknownKind { node_id, kind })) => {
            assert_eq!(node_id, "n1");
            assert_eq!(kind, "quantum_portal");
        }
        other => panic!("expected UnknownKind, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_duplicate_ids_are_rejected_before_the_pipeline() {
    let nodes = vec![
        trigger("start", "done"),
        action("start", Some("done")),
        end("done", EndStatus::Success),
    ];

    let result = FlowEngine::builder().build().convert_nodes(nodes);
    assert_eq!(result, Err(InputError::DuplicateId("start".to_string())));
}

#[test]
fn test_empty_title_is_rejected() {
    let mut untitled = action("work", Some("done"));
    untitled.title = "  ".to_string();
    let nodes = vec![
        trigger("start", "work"),
        untitled,
        end("done", EndStatus::Success),
    ];

    let result = FlowEngine::builder().build().convert_nodes(nodes);
    assert_eq!(
        result,
        Err(InputError::MissingTitle {
            node_id: "work".to_string()
        })
    );
}

#[test]
fn test_conversion_is_deterministic() {
    let first = convert_payload(SYNTHESIS_PAYLOAD);
    let second = convert_payload(SYNTHESIS_PAYLOAD);
    assert_eq!(first, second);
}

#[test]
fn test_artifact_round_trip() {
    let graph = match convert_payload(SYNTHESIS_PAYLOAD) {
        ConversionOutcome::Converged(graph) => graph,
        _ => panic!("expected convergence"),
    };

    let bytes = graph.to_bytes().expect("serializes");
    let restored = ConvergedGraph::from_bytes(&bytes).expect("deserializes");
    assert_eq!(graph, restored);
}

#[test]
fn test_messy_payload_converges_with_report() {
    // Garbage reference, missing end, missing failure branch: the engine
    // repairs all of it and says what it did.
    let payload = r#"{
        "nodes": [
            {"id": "intake", "kind": "manual", "title": "Intake", "nextOnSuccess": "review"},
            {"id": "review", "kind": "condition", "title": "Review", "nextOnSuccess": "archive"},
            {"id": "archive", "kind": "task", "title": "Archive", "nextOnSuccess": "gone_forever"}
        ]
    }"#;

    let graph = match convert_payload(payload) {
        ConversionOutcome::Converged(graph) => graph,
        ConversionOutcome::Exhausted { report, .. } => {
            panic!("expected convergence, got errors: {:?}", report.errors)
        }
    };

    assert!(graph.report.errors.is_empty());
    assert!(!graph.report.fixes_applied.is_empty());
    assert!(
        graph
            .report
            .warnings
            .iter()
            .any(|w| w.code == FindingCode::UnresolvedRef)
    );
    // The repaired graph still satisfies every invariant.
    assert_eq!(
        graph
            .nodes
            .iter()
            .filter(|n| n.role.kind() == NodeKind::Trigger)
            .count(),
        1
    );
    assert!(graph.nodes.iter().any(|n| matches!(
        n.role,
        NodeRole::End {
            status: EndStatus::Success
        }
    )));
}
