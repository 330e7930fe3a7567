//! Common test utilities for building draft node graphs.
use seiri::prelude::*;

/// Creates a trigger node pointing at `next`.
#[allow(dead_code)]
pub fn trigger(id: &str, next: &str) -> DraftNode {
    let mut node = DraftNode::new(id, NodeKind::Trigger, "Start");
    node.next_on_success = Some(next.to_string());
    node
}

/// Creates an action node with an optional follow-up reference.
#[allow(dead_code)]
pub fn action(id: &str, next: Option<&str>) -> DraftNode {
    let mut node = DraftNode::new(id, NodeKind::Action, format!("Run {}", id));
    node.next_on_success = next.map(str::to_string);
    node
}

/// Creates a condition node with the given branches.
#[allow(dead_code)]
pub fn condition(id: &str, on_success: Option<&str>, on_failure: Option<&str>) -> DraftNode {
    let mut node = DraftNode::new(id, NodeKind::Condition, format!("Check {}", id));
    node.next_on_success = on_success.map(str::to_string);
    node.next_on_failure = on_failure.map(str::to_string);
    node
}

/// Creates an end node with the given status.
#[allow(dead_code)]
pub fn end(id: &str, status: EndStatus) -> DraftNode {
    let mut node = DraftNode::new(id, NodeKind::End, "Finished");
    node.end_status = Some(status);
    node
}

/// `Trigger -> Action -> Action -> End(Success)`, no branching.
#[allow(dead_code)]
pub fn linear_flow() -> Vec<DraftNode> {
    vec![
        trigger("start", "fetch"),
        action("fetch", Some("store")),
        action("store", Some("done")),
        end("done", EndStatus::Success),
    ]
}

/// A flow with one condition branching into a success path and an error end.
///
/// `Trigger -> Condition -(yes)-> Action -> End(Success)`
/// `           Condition -(no)-> End(Error)`
#[allow(dead_code)]
pub fn branching_flow() -> Vec<DraftNode> {
    vec![
        trigger("start", "in_stock"),
        condition("in_stock", Some("ship"), Some("failed")),
        action("ship", Some("done")),
        end("done", EndStatus::Success),
        end("failed", EndStatus::Error),
    ]
}
