//! Node registry integration tests

mod test_utils;

use meshnode_core::{NodeChange, NodeNum, NodeRegistry, NodeRow, NodeUpdate, Timestamp};
use test_utils::{
    create_test_registry, device_event, heard_event, identity_event, position_event, TEST_NOW,
};

fn now() -> Timestamp {
    Timestamp::from_secs(TEST_NOW)
}

fn nums(nodes: &[std::sync::Arc<meshnode_core::NodeRecord>]) -> Vec<u32> {
    nodes.iter().map(|n| n.num().value()).collect()
}

#[test]
fn test_upsert_unseen_creates_empty_record() {
    let mut registry = NodeRegistry::new();
    let num = NodeNum::new(77);
    registry.upsert(num, NodeUpdate::default());

    let node = registry.get(num).unwrap();
    assert!(node.user().is_none());
    assert!(node.position().is_none());
    assert!(node.device_metrics().is_none());
    assert!(node.environment_metrics().is_none());
    assert!(node.snr().is_none());
    assert!(node.rssi().is_none());
    assert!(node.hop_limit().is_none());
    assert_eq!(node.last_heard(), Timestamp::NEVER);
}

#[test]
fn test_position_only_update_keeps_other_parts() {
    let mut registry = NodeRegistry::new();
    registry.apply(&identity_event(5, "Alice", "AL", 9), now());
    registry.apply(&device_event(5, 80, 4.0), now());
    registry.apply(&position_event(5, 450_000_000, -1_220_000_000, 0), now());

    let node = registry.get(NodeNum::new(5)).unwrap();
    assert_eq!(node.user().unwrap().long_name, "Alice");
    assert_eq!(node.device_metrics().unwrap().battery_level, 80);
    assert!(node.valid_position().is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_invalid_position_is_stored_but_not_used() {
    let mut registry = NodeRegistry::new();
    registry.apply(&identity_event(5, "Alice", "AL", 9), now());
    registry.apply(&position_event(5, 910_000_000, 100_000_000, 0), now());

    let node = registry.get(NodeNum::new(5)).unwrap();
    assert!(node.position().is_some());
    assert!(node.valid_position().is_none());
    // The rest of the record is unaffected
    assert!(node.user().is_some());
}

#[test]
fn test_all_keeps_insertion_order() {
    let mut registry = NodeRegistry::new();
    for num in [30, 10, 20] {
        registry.apply(&heard_event(num, TEST_NOW), now());
    }
    registry.apply(&heard_event(10, TEST_NOW + 5), now());

    assert_eq!(nums(&registry.all()), vec![30, 10, 20]);
}

#[test]
fn test_reindex_local_first_is_a_projection() {
    let registry = create_test_registry(4);

    assert_eq!(nums(&registry.reindex_local_first(NodeNum::new(3))), vec![3, 1, 2, 4]);
    assert_eq!(nums(&registry.all()), vec![1, 2, 3, 4]);
    // Unknown local node leaves the order alone
    assert_eq!(nums(&registry.reindex_local_first(NodeNum::new(99))), vec![1, 2, 3, 4]);
}

#[test]
fn test_display_order_most_recent_first() {
    // create_test_registry hears node n at TEST_NOW - 1000 + n
    let registry = create_test_registry(4);

    assert_eq!(nums(&registry.display_order(Some(NodeNum::new(2)))), vec![2, 4, 3, 1]);
    assert_eq!(nums(&registry.display_order(None)), vec![1, 4, 3, 2]);
}

#[test]
fn test_snapshot_matches_registry_views() {
    let registry = create_test_registry(3);
    let snapshot = registry.snapshot();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(nums(&snapshot.all()), nums(&registry.all()));
    assert_eq!(
        nums(&snapshot.reindex_local_first(NodeNum::new(2))),
        nums(&registry.reindex_local_first(NodeNum::new(2)))
    );
    assert!(snapshot.get(NodeNum::new(3)).is_some());
    assert!(snapshot.get(NodeNum::new(4)).is_none());
}

#[test]
fn test_snapshot_shared_across_threads() {
    let mut registry = create_test_registry(2);
    let snapshot = registry.snapshot();
    registry.apply(&heard_event(3, TEST_NOW), now());

    let handle = std::thread::spawn(move || snapshot.len());
    assert_eq!(handle.join().unwrap(), 2);
    assert_eq!(registry.snapshot().len(), 3);
}

#[test]
fn test_change_stream_order() {
    let mut registry = NodeRegistry::new();
    let mut changes = registry.subscribe_changes();

    registry.apply(&heard_event(1, TEST_NOW), now());
    registry.apply(&heard_event(2, TEST_NOW), now());
    registry.apply(&heard_event(1, TEST_NOW + 1), now());

    let received: Vec<NodeChange> = std::iter::from_fn(|| changes.try_recv().ok()).collect();
    assert_eq!(
        received,
        vec![
            NodeChange::Added(NodeNum::new(1)),
            NodeChange::Added(NodeNum::new(2)),
            NodeChange::Updated(NodeNum::new(1)),
        ]
    );
}

#[test]
fn test_export_and_reload_rows() {
    let mut registry = NodeRegistry::new();
    registry.apply(&identity_event(8, "Base", "BS", 43), now());
    registry.apply(&position_event(8, 451_234_567, -1_221_234_567, 1_000), now());
    registry.apply(&device_event(8, 101, 5.1), now());
    registry.apply(&heard_event(9, TEST_NOW - 30), now());

    let rows = registry.export_rows();
    assert_eq!(rows.len(), 2);

    let json = serde_json::to_string(&rows).unwrap();
    let rows: Vec<NodeRow> = serde_json::from_str(&json).unwrap();
    let reloaded = NodeRegistry::from_rows(rows);

    assert_eq!(nums(&reloaded.all()), vec![8, 9]);
    for (original, restored) in registry.all().iter().zip(reloaded.all().iter()) {
        assert_eq!(**original, **restored);
    }
}
