//! Test utilities for building registries and decoded events
//!
//! Shared by the integration tests; every helper takes explicit timestamps so
//! results never depend on the wall clock.

#![allow(dead_code)]

use meshnode_core::wire::{
    DeviceMetricsUpdate, EnvironmentMetricsUpdate, IdentityUpdate, LinkQualityUpdate,
    PositionUpdate, RSSI_UNKNOWN, SNR_UNKNOWN,
};
use meshnode_core::{
    FixedTimeSource, MeshEvent, NodeNum, NodeRecord, NodeRegistry, NodeUpdate, Position,
    Timestamp,
};

// ----------------------------------------------------------------------------
// Clocks
// ----------------------------------------------------------------------------

/// Clock reading used by most tests
pub const TEST_NOW: i64 = 1_700_000_000;

pub fn test_clock() -> FixedTimeSource {
    FixedTimeSource::new(Timestamp::from_secs(TEST_NOW))
}

// ----------------------------------------------------------------------------
// Events
// ----------------------------------------------------------------------------

pub fn identity_event(num: u32, long_name: &str, short_name: &str, hw_model: i32) -> MeshEvent {
    MeshEvent::Identity(IdentityUpdate {
        num,
        id: NodeNum::new(num).to_string(),
        long_name: long_name.to_string(),
        short_name: short_name.to_string(),
        hw_model,
        is_licensed: false,
    })
}

pub fn position_event(num: u32, latitude_i: i32, longitude_i: i32, time: i32) -> MeshEvent {
    MeshEvent::Position(PositionUpdate {
        num,
        latitude_i,
        longitude_i,
        altitude: 10,
        time,
    })
}

pub fn device_event(num: u32, battery_level: i32, voltage: f32) -> MeshEvent {
    MeshEvent::DeviceMetrics(DeviceMetricsUpdate {
        num,
        battery_level,
        voltage,
        channel_utilization: 8.3,
        air_util_tx: 0.5,
        time: None,
    })
}

pub fn environment_event(num: u32, temperature: f32, relative_humidity: f32) -> MeshEvent {
    MeshEvent::EnvironmentMetrics(EnvironmentMetricsUpdate {
        num,
        temperature,
        relative_humidity,
        barometric_pressure: 0.0,
        gas_resistance: 0.0,
        voltage: 0.0,
        current: 0.0,
        time: None,
    })
}

pub fn heard_event(num: u32, last_heard: i64) -> MeshEvent {
    MeshEvent::LinkQuality(LinkQualityUpdate {
        num,
        snr: SNR_UNKNOWN,
        rssi: RSSI_UNKNOWN,
        hop_limit: 0,
        channel: 0,
        last_heard: last_heard as i32,
    })
}

// ----------------------------------------------------------------------------
// Records
// ----------------------------------------------------------------------------

/// Registry with `count` nodes numbered from 1, first heard in that order
pub fn create_test_registry(count: u32) -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    for num in 1..=count {
        registry.apply(
            &heard_event(num, TEST_NOW - 1_000 + num as i64),
            Timestamp::from_secs(TEST_NOW),
        );
    }
    registry
}

/// Standalone record with a position in degrees
pub fn create_node_at(num: u32, latitude: f64, longitude: f64) -> NodeRecord {
    NodeRecord::new(NodeNum::new(num)).with_update(&NodeUpdate::position(Position::new(
        latitude,
        longitude,
        0,
        Timestamp::from_secs(TEST_NOW),
    )))
}

/// Record placed `meters` due north of (45, -122)
pub fn create_node_north_of_base(num: u32, meters: f64) -> NodeRecord {
    let degrees = meters / meshnode_core::geo::EARTH_RADIUS_METERS * 180.0 / std::f64::consts::PI;
    create_node_at(num, 45.0 + degrees, -122.0)
}
