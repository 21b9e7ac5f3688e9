//! Node record query tests
//!
//! Distance thresholds, staleness, battery and environment strings, checked
//! through the public API only.

mod test_utils;

use meshnode_core::{
    DeviceMetrics, EnvironmentMetrics, HardwareModel, MeshUser, NodeNum, NodeRecord, NodeUpdate,
    Timestamp, UnitSystem,
};
use test_utils::{create_node_at, create_node_north_of_base};

fn base() -> NodeRecord {
    create_node_at(1, 45.0, -122.0)
}

fn with_environment(env: EnvironmentMetrics) -> NodeRecord {
    NodeRecord::new(NodeNum::new(9)).with_update(&NodeUpdate::environment_metrics(env))
}

fn env(temperature: f32, relative_humidity: f32, current: f32) -> EnvironmentMetrics {
    EnvironmentMetrics {
        time: Timestamp::from_secs(1),
        temperature,
        relative_humidity,
        barometric_pressure: 0.0,
        gas_resistance: 0.0,
        voltage: 0.0,
        current,
    }
}

// ----------------------------------------------------------------------------
// Distance
// ----------------------------------------------------------------------------

#[test]
fn test_metric_thresholds() {
    let near = create_node_north_of_base(2, 999.5);
    let far = create_node_north_of_base(3, 1000.5);

    assert_eq!(base().distance_to(&near), Some(999));
    assert_eq!(base().formatted_distance(&near, UnitSystem::Metric).as_deref(), Some("999 m"));
    assert_eq!(base().formatted_distance(&far, UnitSystem::Metric).as_deref(), Some("1.0 km"));
}

#[test]
fn test_imperial_thresholds() {
    let below = create_node_north_of_base(2, 1608.5);
    let above = create_node_north_of_base(3, 1609.5);

    assert_eq!(base().formatted_distance(&below, UnitSystem::Imperial).as_deref(), Some("5276 ft"));
    assert_eq!(base().formatted_distance(&above, UnitSystem::Imperial).as_deref(), Some("1.0 mi"));
}

#[test]
fn test_distance_ties_round_half_up() {
    let km = create_node_north_of_base(2, 1250.5);
    let feet = create_node_north_of_base(3, 500.5);

    assert_eq!(base().distance_to(&km), Some(1250));
    assert_eq!(base().formatted_distance(&km, UnitSystem::Metric).as_deref(), Some("1.3 km"));
    assert_eq!(base().distance_to(&feet), Some(500));
    assert_eq!(base().formatted_distance(&feet, UnitSystem::Imperial).as_deref(), Some("1641 ft"));
}

#[test]
fn test_distance_absent_for_missing_or_invalid_positions() {
    let nowhere = NodeRecord::new(NodeNum::new(5));
    let null_island = create_node_at(6, 0.0, 0.0);

    assert_eq!(base().distance_to(&nowhere), None);
    assert_eq!(nowhere.distance_to(&base()), None);
    assert_eq!(base().distance_to(&null_island), None);
    assert_eq!(base().bearing_to(&null_island), None);
    assert_eq!(base().formatted_distance(&nowhere, UnitSystem::Metric), None);
}

#[test]
fn test_bearing_north_is_zero() {
    let north = create_node_north_of_base(2, 5_000.0);
    assert_eq!(base().bearing_to(&north), Some(0));
    assert_eq!(north.bearing_to(&base()), Some(180));
}

// ----------------------------------------------------------------------------
// Staleness
// ----------------------------------------------------------------------------

#[test]
fn test_never_heard_is_offline() {
    let node = NodeRecord::new(NodeNum::new(1));
    assert!(!node.is_online(Timestamp::from_secs(10_000)));
    // Clock readings near the epoch are still inside the window
    assert!(node.is_online(Timestamp::from_secs(900)));
}

// ----------------------------------------------------------------------------
// Telemetry Strings
// ----------------------------------------------------------------------------

#[test]
fn test_environment_summary_zero_omitted() {
    let node = with_environment(env(0.0, 0.01, 0.0));
    assert_eq!(node.environment_summary(false), "0% ");

    let node = with_environment(env(0.0, 0.0, 0.0));
    assert_eq!(node.environment_summary(false), "");
}

#[test]
fn test_environment_summary_all_fields() {
    let node = with_environment(EnvironmentMetrics {
        time: Timestamp::from_secs(1),
        temperature: 21.5,
        relative_humidity: 40.0,
        barometric_pressure: 1013.3,
        gas_resistance: 12.0,
        voltage: 3.5,
        current: 12.5,
    });
    assert_eq!(
        node.environment_summary(false),
        "21.5°C 40% 1013.3hPa 12MΩ 3.50V 12.5mA"
    );
    assert!(node.environment_summary(true).starts_with("70.7°F 40% "));
}

#[test]
fn test_environment_summary_ties_round_half_up() {
    let node = with_environment(EnvironmentMetrics {
        time: Timestamp::from_secs(1),
        temperature: 0.0,
        relative_humidity: 40.5,
        barometric_pressure: 0.0,
        gas_resistance: 0.0,
        voltage: 4.125,
        current: 0.25,
    });
    assert_eq!(node.environment_summary(false), "41% 4.13V 0.3mA");
}

#[test]
fn test_environment_summary_without_metrics() {
    assert_eq!(NodeRecord::new(NodeNum::new(1)).environment_summary(true), "");
}

#[test]
fn test_battery_label_range() {
    let node = |level| {
        NodeRecord::new(NodeNum::new(1)).with_update(&NodeUpdate::device_metrics(DeviceMetrics {
            time: Timestamp::from_secs(1),
            battery_level: level,
            voltage: 3.7,
            channel_utilization: 0.0,
            air_util_tx: 0.0,
        }))
    };
    assert_eq!(node(0).battery_label(), "");
    assert_eq!(node(64).battery_label(), "64%");
    assert_eq!(node(101).battery_label(), "");
}

#[test]
fn test_hw_model_string_through_record() {
    let node = NodeRecord::new(NodeNum::new(1)).with_update(&NodeUpdate::identity(MeshUser::new(
        "!00000001",
        "Relay",
        "RL",
        HardwareModel::Rak4631,
        false,
    )));
    let user = node.user().unwrap();
    assert_eq!(user.hw_model_string().as_deref(), Some("rak4631"));
}
