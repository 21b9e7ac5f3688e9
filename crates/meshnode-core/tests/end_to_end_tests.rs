//! End-to-end tests: decoded events in, node list rows out

mod test_utils;

use meshnode_core::{
    DisplayConfig, MeshEvent, NodeListEntry, NodeNum, NodeRegistry, TimeSource, Timestamp,
};
use meshnode_core::decimal::format_plain;
use meshnode_core::telemetry::deg_d;
use test_utils::{
    create_node_at, device_event, environment_event, heard_event, identity_event, position_event,
    test_clock, TEST_NOW,
};

#[test]
fn test_identity_then_position_with_default_time() {
    let mut registry = NodeRegistry::new();
    let default_time = Timestamp::from_secs(1000);

    let identity: MeshEvent = serde_json::from_str(
        r#"{"kind":"identity","num":42,"id":"!a","long_name":"Alice","short_name":"AL","hw_model":0}"#,
    )
    .unwrap();
    registry.apply(&identity, default_time);
    registry.apply(
        &position_event(42, 450_000_000, -1_220_000_000, 0),
        default_time,
    );

    let node = registry.get(NodeNum::new(42)).unwrap();
    let position = node.valid_position().unwrap();
    assert_eq!(position.time, Timestamp::from_secs(1000));
    assert_eq!(position.altitude, 10);

    let same_spot = create_node_at(43, position.latitude, position.longitude);
    assert_eq!(node.distance_to(&same_spot), Some(0));
    assert_eq!(node.user().unwrap().hw_model_string(), None);
    assert_eq!(node.user().unwrap().long_name, "Alice");
}

#[test]
fn test_node_list_rows() {
    let clock = test_clock();
    let now = clock.now();
    let mut registry = NodeRegistry::new();

    registry.apply(&identity_event(1, "Home Base", "HB", 43), now);
    registry.apply(&position_event(1, 450_000_000, -1_220_000_000, 0), now);
    registry.apply(&device_event(1, 92, 4.05), now);
    registry.apply(&heard_event(1, TEST_NOW - 10), now);

    registry.apply(&identity_event(2, "Hill Relay", "HR", 9), now);
    registry.apply(&position_event(2, 450_100_000, -1_220_000_000, 0), now);
    registry.apply(&environment_event(2, 18.5, 0.0), now);
    registry.apply(&heard_event(2, TEST_NOW - 7_200), now);

    let mut config = DisplayConfig::default();
    config.ignore_incoming.add(NodeNum::new(2)).unwrap();

    let own = NodeNum::new(1);
    let local = registry.get(own);
    let rows: Vec<NodeListEntry> = registry
        .display_order(Some(own))
        .iter()
        .map(|node| NodeListEntry::build(node, local.as_deref(), &config, now))
        .collect();

    assert_eq!(rows.len(), 2);

    let home = &rows[0];
    assert!(home.is_local);
    assert!(home.online);
    assert_eq!(home.short_name, "HB");
    assert_eq!(home.battery, "92% 4.05V");
    assert_eq!(home.last_heard, "now");
    assert_eq!(home.distance, None);
    assert_eq!(home.signal.as_deref(), Some("ChUtil 8.3% AirUtilTX 0.5%"));

    let relay = &rows[1];
    assert!(relay.ignored);
    assert!(!relay.online);
    assert_eq!(relay.long_name, "Hill Relay");
    assert_eq!(relay.last_heard, "2 h");
    assert_eq!(relay.distance.as_deref(), Some("1.1 km"));
    assert_eq!(relay.bearing, Some(0));
    assert_eq!(relay.environment.as_deref(), Some("18.5°C "));
    assert_eq!(relay.battery, "?");
    let expected_uri = format!(
        "geo:{},{}?z=17&label=Hill+Relay",
        format_plain(deg_d(450_100_000)),
        format_plain(deg_d(-1_220_000_000))
    );
    assert_eq!(relay.geo_uri.as_deref(), Some(expected_uri.as_str()));
}
