//! BFS layout assignment.
//!
//! Breadth-first traversal from the trigger node assigns every node a
//! discrete column (depth) and lane (path classification) cell, then a
//! concrete coordinate. All output is deterministic: identical input graphs
//! always yield identical positions.

use std::collections::{BTreeMap, VecDeque};

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::graph::{Connection, ConnectionKind, DraftNode, NodeKind};

/// Spacing and origin parameters, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between BFS depths.
    pub column_spacing: f64,
    /// Vertical distance between lanes and between stacked cell occupants.
    pub row_spacing: f64,
    /// Coordinate of the trigger node's cell.
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 260.0,
            row_spacing: 120.0,
            origin_x: 80.0,
            origin_y: 300.0,
        }
    }
}

/// A 2-D canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Layout lane a node is routed into, derived from the classification of
/// the connection used to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    Main,
    Error,
    Alternative,
}

impl Lane {
    fn base_row(self) -> i64 {
        match self {
            Lane::Main => 0,
            Lane::Error => 1,
            Lane::Alternative => -1,
        }
    }

    /// Stacking direction along the lane's axis: error rows grow downward,
    /// alternative rows upward.
    fn direction(self) -> i64 {
        match self {
            Lane::Alternative => -1,
            _ => 1,
        }
    }
}

/// Assigns a position to every node.
///
/// Success and default edges keep the parent's lane, error edges route into
/// the error lane, and the second-or-later conditional branch out of one
/// source routes into the alternative lane. Each (depth, row) cell holds one
/// node; occupied cells push later arrivals further along the lane's axis.
/// Nodes unreachable from the trigger are appended below all lanes, one row
/// each, in sequence order.
pub fn assign_positions(
    nodes: &[DraftNode],
    connections: &[Connection],
    config: &LayoutConfig,
) -> BTreeMap<String, Position> {
    let mut positions = BTreeMap::new();
    if nodes.is_empty() {
        return positions;
    }

    let mut adjacency: AHashMap<&str, Vec<(&str, ConnectionKind)>> = AHashMap::new();
    for connection in connections {
        adjacency
            .entry(connection.source_id.as_str())
            .or_default()
            .push((connection.target_id.as_str(), connection.kind));
    }

    let mut occupied: AHashSet<(usize, i64)> = AHashSet::new();
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<(&str, usize, Lane)> = VecDeque::new();
    let mut max_row: i64 = 0;

    if let Some(trigger) = nodes.iter().find(|node| node.kind == NodeKind::Trigger) {
        visited.insert(trigger.id.as_str());
        queue.push_back((trigger.id.as_str(), 0, Lane::Main));
    }

    while let Some((id, depth, lane)) = queue.pop_front() {
        let row = claim_row(&mut occupied, depth, lane);
        max_row = max_row.max(row);
        positions.insert(
            id.to_owned(),
            Position {
                x: config.origin_x + depth as f64 * config.column_spacing,
                y: config.origin_y + row as f64 * config.row_spacing,
            },
        );

        let mut conditional_branches = 0usize;
        for &(target, kind) in adjacency.get(id).into_iter().flatten() {
            let next_lane = match kind {
                ConnectionKind::Success | ConnectionKind::Default => lane,
                ConnectionKind::Error => Lane::Error,
                ConnectionKind::Conditional => {
                    conditional_branches += 1;
                    if conditional_branches > 1 {
                        Lane::Alternative
                    } else {
                        lane
                    }
                }
            };
            if visited.insert(target) {
                queue.push_back((target, depth + 1, next_lane));
            }
        }
    }

    // Should not occur post-validation, but unreachable nodes still get a
    // deterministic spot below everything placed so far.
    let mut overflow_row = if positions.is_empty() { 0 } else { max_row + 2 };
    for node in nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }
        positions.insert(
            node.id.clone(),
            Position {
                x: config.origin_x,
                y: config.origin_y + overflow_row as f64 * config.row_spacing,
            },
        );
        overflow_row += 1;
    }

    positions
}

/// Claims the first free row for a (depth, lane) cell, probing along the
/// lane's stacking axis.
fn claim_row(occupied: &mut AHashSet<(usize, i64)>, depth: usize, lane: Lane) -> i64 {
    let mut row = lane.base_row();
    while !occupied.insert((depth, row)) {
        row += lane.direction();
    }
    row
}
