//! Tests for the BFS layout assigner.
mod common;
use common::*;
use seiri::prelude::*;

fn positions_for(nodes: &[DraftNode], config: &LayoutConfig) -> BTreeMap<String, Position> {
    let connections = synthesize_connections(nodes);
    assign_positions(nodes, &connections, config)
}

#[test]
fn test_linear_flow_stays_on_one_lane() {
    // Scenario: Trigger -> Action -> Action -> End with no branching.
    let config = LayoutConfig::default();
    let positions = positions_for(&linear_flow(), &config);

    let order = ["start", "fetch", "store", "done"];
    for (depth, id) in order.iter().enumerate() {
        let position = positions[*id];
        assert_eq!(
            position.x,
            config.origin_x + depth as f64 * config.column_spacing
        );
        assert_eq!(position.y, config.origin_y);
    }
}

#[test]
fn test_error_branch_drops_below_center() {
    let config = LayoutConfig::default();
    let positions = positions_for(&branching_flow(), &config);

    // The condition's success target keeps the main lane...
    assert_eq!(positions["ship"].y, config.origin_y);
    // ...while the failure target lands one row below.
    assert_eq!(positions["failed"].y, config.origin_y + config.row_spacing);
    assert_eq!(positions["ship"].x, positions["failed"].x);
}

#[test]
fn test_second_conditional_branch_rises_above_center() {
    let config = LayoutConfig::default();
    let nodes = vec![
        trigger("start", "a"),
        action("a", None),
        action("b", None),
        end("done", EndStatus::Success),
    ];
    // Two conditional branches out of one source: the first keeps the lane,
    // the second shifts to the alternative lane above center.
    let connections = vec![
        Connection {
            source_id: "start".to_string(),
            target_id: "a".to_string(),
            kind: ConnectionKind::Conditional,
            label: None,
        },
        Connection {
            source_id: "start".to_string(),
            target_id: "b".to_string(),
            kind: ConnectionKind::Conditional,
            label: None,
        },
    ];

    let positions = assign_positions(&nodes, &connections, &config);
    assert_eq!(positions["a"].y, config.origin_y);
    assert_eq!(positions["b"].y, config.origin_y - config.row_spacing);
}

#[test]
fn test_same_cell_occupants_stack_without_overlap() {
    let config = LayoutConfig::default();
    let nodes = vec![
        trigger("start", "a"),
        action("a", None),
        action("b", None),
    ];
    let connections = vec![
        Connection {
            source_id: "start".to_string(),
            target_id: "a".to_string(),
            kind: ConnectionKind::Error,
            label: None,
        },
        Connection {
            source_id: "start".to_string(),
            target_id: "b".to_string(),
            kind: ConnectionKind::Error,
            label: None,
        },
    ];

    let positions = assign_positions(&nodes, &connections, &config);
    // Both land in the error lane at depth 1 and must not overlap.
    assert_eq!(positions["a"].x, positions["b"].x);
    assert_ne!(positions["a"].y, positions["b"].y);
    assert_eq!(
        (positions["b"].y - positions["a"].y).abs(),
        config.row_spacing
    );
}

#[test]
fn test_unreachable_nodes_fall_into_overflow_rows() {
    let config = LayoutConfig::default();
    let nodes = vec![
        trigger("start", "done"),
        end("done", EndStatus::Success),
        action("orphan_a", None),
        action("orphan_b", None),
    ];
    let positions = positions_for(&nodes, &config);

    let lowest_reachable = positions["start"].y.max(positions["done"].y);
    assert!(positions["orphan_a"].y > lowest_reachable);
    assert!(positions["orphan_b"].y > positions["orphan_a"].y);
    // One row each.
    assert_eq!(
        positions["orphan_b"].y - positions["orphan_a"].y,
        config.row_spacing
    );
}

#[test]
fn test_layout_is_deterministic() {
    let nodes = branching_flow();
    let config = LayoutConfig::default();

    let first = positions_for(&nodes, &config);
    let second = positions_for(&nodes, &config);
    assert_eq!(first, second);
}

#[test]
fn test_custom_spacing_is_honored() {
    let config = LayoutConfig {
        column_spacing: 10.0,
        row_spacing: 5.0,
        origin_x: 1.0,
        origin_y: 2.0,
    };
    let positions = positions_for(&linear_flow(), &config);

    assert_eq!(positions["start"].x, 1.0);
    assert_eq!(positions["fetch"].x, 11.0);
    assert_eq!(positions["store"].x, 21.0);
    assert_eq!(positions["done"].x, 31.0);
}
