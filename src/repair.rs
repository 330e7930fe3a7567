//! Bounded automatic repair.
//!
//! Each strategy is keyed to one validator error code and rewrites the node
//! sequence deterministically. All applicable strategies run in one pass, in
//! a fixed order; the engine re-validates between passes and enforces the
//! iteration cap. Every applied fix is reported as a human-readable note
//! naming the affected node.

use ahash::AHashSet;
use tracing::debug;

use crate::graph::{DraftNode, EndStatus, FindingCode, NodeKind, PathClass};
use crate::validate::Validation;

/// Result of one repair pass.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub nodes: Vec<DraftNode>,
    pub fixes: Vec<String>,
}

/// Applies every strategy whose error code is present in the validation.
///
/// Codes without a strategy (`MULTIPLE_TRIGGERS`,
/// `CONDITION_INCOMPLETE_SUCCESS`, `END_NO_STATUS`, `TRIGGER_NO_OUTPUT`)
/// are left untouched for the caller to surface.
pub fn repair(nodes: Vec<DraftNode>, validation: &Validation) -> RepairOutcome {
    let mut pass = RepairPass {
        nodes,
        fixes: Vec::new(),
    };

    if validation.has_error(FindingCode::NoTrigger) {
        pass.fix_missing_trigger();
    }
    if validation.has_error(FindingCode::NoSuccessEnd) {
        pass.fix_missing_success_end();
    }
    if validation.has_error(FindingCode::InvalidRef) {
        pass.fix_dangling_references();
    }
    if validation.has_error(FindingCode::ConditionIncompleteFailure) {
        pass.fix_condition_failures();
    }
    if validation.has_error(FindingCode::EndHasOutgoing) {
        pass.fix_end_outgoing();
    }
    if validation.has_error(FindingCode::CycleDetected) {
        pass.break_cycles(&validation.back_edges);
    }

    RepairOutcome {
        nodes: pass.nodes,
        fixes: pass.fixes,
    }
}

struct RepairPass {
    nodes: Vec<DraftNode>,
    fixes: Vec<String>,
}

impl RepairPass {
    /// `NO_TRIGGER`: promote the first node when nothing references it,
    /// otherwise synthesize a trigger ahead of the sequence.
    fn fix_missing_trigger(&mut self) {
        let referenced: AHashSet<String> = self
            .nodes
            .iter()
            .flat_map(|node| {
                [
                    node.next_on_success.clone(),
                    node.next_on_failure.clone(),
                ]
            })
            .flatten()
            .collect();

        let promotable = self
            .nodes
            .first()
            .map(|first| !referenced.contains(&first.id))
            .unwrap_or(false);

        if promotable {
            {
                let node = &mut self.nodes[0];
                node.kind = NodeKind::Trigger;
                node.end_status = None;
            }
            let id = self.nodes[0].id.clone();
            self.note(format!("Promoted first node '{}' to trigger", id));
        } else {
            let id = self.unique_id("trigger");
            let mut trigger = DraftNode::new(id.clone(), NodeKind::Trigger, "Start");
            trigger.next_on_success = self.nodes.first().map(|node| node.id.clone());
            let linked = trigger.next_on_success.clone();
            self.nodes.insert(0, trigger);
            match linked {
                Some(next) => self.note(format!(
                    "Synthesized trigger node '{}' ahead of '{}'",
                    id, next
                )),
                None => self.note(format!("Synthesized trigger node '{}'", id)),
            }
        }
    }

    /// `NO_SUCCESS_END`: reclassify the last eligible node, or synthesize a
    /// success end when the eligible node must keep its role.
    fn fix_missing_success_end(&mut self) {
        let eligible = self
            .nodes
            .iter()
            .rposition(|node| !node.is_end_with(EndStatus::Error));

        match eligible {
            Some(index)
                if !matches!(
                    self.nodes[index].kind,
                    NodeKind::Trigger | NodeKind::Condition
                ) =>
            {
                {
                    let node = &mut self.nodes[index];
                    node.kind = NodeKind::End;
                    node.end_status = Some(EndStatus::Success);
                    node.next_on_success = None;
                    node.next_on_failure = None;
                }
                let id = self.nodes[index].id.clone();
                self.note(format!("Reclassified node '{}' into a successful end", id));
            }
            Some(index) => {
                let end_id = self.synthesize_success_end();
                if self.nodes[index].next_on_success.is_none() {
                    self.nodes[index].next_on_success = Some(end_id.clone());
                    let id = self.nodes[index].id.clone();
                    self.note(format!(
                        "Synthesized end node '{}' and linked '{}' to it",
                        end_id, id
                    ));
                } else {
                    self.note(format!("Synthesized end node '{}'", end_id));
                }
            }
            None => {
                let end_id = self.synthesize_success_end();
                self.note(format!("Synthesized end node '{}'", end_id));
            }
        }
    }

    /// `INVALID_REF`: clear dangling references; success branches are
    /// relinked to the next eligible node in sequence order.
    fn fix_dangling_references(&mut self) {
        let ids: AHashSet<String> = self.nodes.iter().map(|node| node.id.clone()).collect();

        for index in 0..self.nodes.len() {
            if let Some(target) = self.nodes[index].next_on_failure.clone() {
                if !ids.contains(&target) {
                    self.nodes[index].next_on_failure = None;
                    let id = self.nodes[index].id.clone();
                    self.note(format!(
                        "Cleared dangling failure reference '{}' on node '{}'",
                        target, id
                    ));
                }
            }
            if let Some(target) = self.nodes[index].next_on_success.clone() {
                if !ids.contains(&target) {
                    let id = self.nodes[index].id.clone();
                    match self.relink_target(index, None) {
                        Some(new_target) => {
                            self.nodes[index].next_on_success = Some(new_target.clone());
                            self.note(format!(
                                "Relinked dangling success reference on node '{}' from '{}' to '{}'",
                                id, target, new_target
                            ));
                        }
                        None => {
                            self.nodes[index].next_on_success = None;
                            self.note(format!(
                                "Cleared dangling success reference '{}' on node '{}'",
                                target, id
                            ));
                        }
                    }
                }
            }
        }
    }

    /// `CONDITION_INCOMPLETE_FAILURE`: link to an existing error end, or
    /// synthesize one. A synthesized error end is shared by every condition
    /// fixed in the same pass.
    fn fix_condition_failures(&mut self) {
        for index in 0..self.nodes.len() {
            if self.nodes[index].kind != NodeKind::Condition
                || self.nodes[index].next_on_failure.is_some()
            {
                continue;
            }
            let existing = self
                .nodes
                .iter()
                .find(|node| node.is_end_with(EndStatus::Error))
                .map(|node| node.id.clone());
            let id = self.nodes[index].id.clone();
            match existing {
                Some(target) => {
                    self.nodes[index].next_on_failure = Some(target.clone());
                    self.note(format!(
                        "Linked failure branch of condition '{}' to existing error end '{}'",
                        id, target
                    ));
                }
                None => {
                    let target = self.synthesize_error_end();
                    self.nodes[index].next_on_failure = Some(target.clone());
                    self.note(format!(
                        "Synthesized error end '{}' and linked failure branch of condition '{}' to it",
                        target, id
                    ));
                }
            }
        }
    }

    /// `END_HAS_OUTGOING`: strip the outgoing references.
    fn fix_end_outgoing(&mut self) {
        for index in 0..self.nodes.len() {
            if self.nodes[index].kind != NodeKind::End || !self.nodes[index].has_outgoing() {
                continue;
            }
            {
                let node = &mut self.nodes[index];
                node.next_on_success = None;
                node.next_on_failure = None;
            }
            let id = self.nodes[index].id.clone();
            self.note(format!(
                "Stripped outgoing references from end node '{}'",
                id
            ));
        }
    }

    /// `CYCLE_DETECTED`: clear each back edge found by the traversal and
    /// relink the source with the same next-in-sequence strategy as
    /// `INVALID_REF`, excluding the node the edge pointed back into.
    fn break_cycles(&mut self, back_edges: &[(String, String)]) {
        for (source, target) in back_edges {
            let Some(index) = self.nodes.iter().position(|node| &node.id == source) else {
                continue;
            };

            let on_success =
                self.nodes[index].next_on_success.as_deref() == Some(target.as_str());
            let on_failure =
                self.nodes[index].next_on_failure.as_deref() == Some(target.as_str());
            if !on_success && !on_failure {
                // Already rewritten by an earlier strategy in this pass.
                continue;
            }

            let relinked = self.relink_target(index, Some(target.as_str()));
            {
                let node = &mut self.nodes[index];
                if on_success {
                    node.next_on_success = relinked.clone();
                } else {
                    node.next_on_failure = relinked.clone();
                }
            }
            match relinked {
                Some(new_target) => self.note(format!(
                    "Broke cycle by clearing edge from '{}' to '{}', relinked to '{}'",
                    source, target, new_target
                )),
                None => self.note(format!(
                    "Broke cycle by clearing edge from '{}' to '{}'",
                    source, target
                )),
            }
        }
    }

    /// Next node in original sequence order that is not an error end,
    /// falling back to any existing success end.
    fn relink_target(&self, from: usize, exclude: Option<&str>) -> Option<String> {
        self.nodes[from + 1..]
            .iter()
            .find(|node| {
                !node.is_end_with(EndStatus::Error) && Some(node.id.as_str()) != exclude
            })
            .map(|node| node.id.clone())
            .or_else(|| {
                self.nodes
                    .iter()
                    .find(|node| {
                        node.is_end_with(EndStatus::Success) && Some(node.id.as_str()) != exclude
                    })
                    .map(|node| node.id.clone())
            })
    }

    fn synthesize_success_end(&mut self) -> String {
        let id = self.unique_id("end_success");
        let mut end = DraftNode::new(id.clone(), NodeKind::End, "Finished");
        end.end_status = Some(EndStatus::Success);
        self.nodes.push(end);
        id
    }

    fn synthesize_error_end(&mut self) -> String {
        let id = self.unique_id("end_error");
        let mut end = DraftNode::new(id.clone(), NodeKind::End, "Failed");
        end.end_status = Some(EndStatus::Error);
        end.path_class = PathClass::Error;
        self.nodes.push(end);
        id
    }

    fn unique_id(&self, base: &str) -> String {
        let existing: AHashSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        if !existing.contains(base) {
            return base.to_owned();
        }
        let mut counter = 2usize;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if !existing.contains(candidate.as_str()) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn note(&mut self, message: String) {
        debug!(fix = %message, "applied autofix");
        self.fixes.push(message);
    }
}
