//! Cycle detection over the directed graph induced by node references.
//!
//! Iterative three-color depth-first traversal with an explicit stack, so
//! arbitrarily deep graphs cannot exhaust the call stack. Nodes are mapped
//! to indices once and traversed arena-style.

use ahash::AHashMap;
use itertools::Itertools;

use crate::graph::{DraftNode, FindingCode, ValidationFinding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Reports a `CYCLE_DETECTED` error for every back edge found, with the full
/// cycle path reconstructed from the traversal stack. Returns the back edges
/// as (source, target) id pairs for the repairer.
pub(crate) fn detect_cycles(
    nodes: &[DraftNode],
    errors: &mut Vec<ValidationFinding>,
) -> Vec<(String, String)> {
    let index: AHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(position, node)| (node.id.as_str(), position))
        .collect();

    // Success edge before failure edge, matching synthesis order.
    let adjacency: Vec<Vec<usize>> = nodes
        .iter()
        .map(|node| {
            [
                node.next_on_success.as_deref(),
                node.next_on_failure.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter_map(|target| index.get(target).copied())
            .collect()
        })
        .collect();

    let mut state = vec![Visit::Unvisited; nodes.len()];
    let mut back_edges = Vec::new();

    for start in 0..nodes.len() {
        if state[start] != Visit::Unvisited {
            continue;
        }
        state[start] = Visit::InProgress;
        // Each frame is (node index, cursor into its adjacency list).
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(&(node, cursor)) = stack.last() {
            match adjacency[node].get(cursor).copied() {
                Some(next) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.1 += 1;
                    }
                    match state[next] {
                        Visit::Unvisited => {
                            state[next] = Visit::InProgress;
                            stack.push((next, 0));
                        }
                        Visit::InProgress => {
                            back_edges.push((nodes[node].id.clone(), nodes[next].id.clone()));
                            errors.push(ValidationFinding::error(
                                FindingCode::CycleDetected,
                                format!("Cycle detected: {}", cycle_path(&stack, next, nodes)),
                                Some(nodes[node].id.clone()),
                            ));
                        }
                        Visit::Done => {}
                    }
                }
                None => {
                    state[node] = Visit::Done;
                    stack.pop();
                }
            }
        }
    }

    back_edges
}

/// The cycle runs from the in-progress target up the stack to the current
/// node and back to the target.
fn cycle_path(stack: &[(usize, usize)], target: usize, nodes: &[DraftNode]) -> String {
    let entry = stack
        .iter()
        .position(|&(node, _)| node == target)
        .unwrap_or(0);
    stack[entry..]
        .iter()
        .map(|&(node, _)| nodes[node].id.as_str())
        .chain(std::iter::once(nodes[target].id.as_str()))
        .join(" -> ")
}
