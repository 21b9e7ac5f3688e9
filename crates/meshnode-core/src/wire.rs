//! Decoded radio-protocol inputs
//!
//! These are the plain records the protocol decoder hands to the registry, one
//! shape per update kind. They keep the wire encoding (1e-7 degree integers,
//! `0` for "time unspecified", `MAX` sentinels for unknown link quality); the
//! telemetry value objects translate them into the crate's own model.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::anonymize::Anonymized;
use crate::registry::NodeUpdate;
use crate::telemetry::{DeviceMetrics, EnvironmentMetrics, LinkQuality, MeshUser, Position};
use crate::types::{NodeNum, Timestamp};

// ----------------------------------------------------------------------------
// Sentinels
// ----------------------------------------------------------------------------

/// SNR value meaning "no signal sample"
pub const SNR_UNKNOWN: f32 = f32::MAX;
/// RSSI value meaning "unknown"
pub const RSSI_UNKNOWN: i32 = i32::MAX;
/// Hop limit value meaning "not filled"
pub const HOP_LIMIT_UNSET: i32 = 0;

// ----------------------------------------------------------------------------
// Update Shapes
// ----------------------------------------------------------------------------

/// User identity as announced by a node
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityUpdate {
    pub num: u32,
    pub id: String,
    pub long_name: String,
    pub short_name: String,
    /// Hardware model wire number
    #[serde(default)]
    pub hw_model: i32,
    #[serde(default)]
    pub is_licensed: bool,
}

/// Position report with integer-scaled coordinates
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub num: u32,
    /// Latitude in 1e-7 degrees
    pub latitude_i: i32,
    /// Longitude in 1e-7 degrees
    pub longitude_i: i32,
    #[serde(default)]
    pub altitude: i32,
    /// Seconds since epoch, 0 when the sender did not fill it
    #[serde(default)]
    pub time: i32,
}

/// Device telemetry sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetricsUpdate {
    pub num: u32,
    #[serde(default)]
    pub battery_level: i32,
    #[serde(default)]
    pub voltage: f32,
    #[serde(default)]
    pub channel_utilization: f32,
    #[serde(default)]
    pub air_util_tx: f32,
    #[serde(default)]
    pub time: Option<i32>,
}

/// Environment sensor sample; `0.0` in any field means the sensor is absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMetricsUpdate {
    pub num: u32,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub relative_humidity: f32,
    #[serde(default)]
    pub barometric_pressure: f32,
    #[serde(default)]
    pub gas_resistance: f32,
    #[serde(default)]
    pub voltage: f32,
    #[serde(default)]
    pub current: f32,
    #[serde(default)]
    pub time: Option<i32>,
}

/// Link quality observed on the last packet received from a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkQualityUpdate {
    pub num: u32,
    #[serde(default = "default_snr")]
    pub snr: f32,
    #[serde(default = "default_rssi")]
    pub rssi: i32,
    #[serde(default)]
    pub hop_limit: i32,
    #[serde(default)]
    pub channel: i32,
    pub last_heard: i32,
}

impl fmt::Debug for IdentityUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityUpdate")
            .field("num", &Anonymized(&self.num))
            .field("id", &Anonymized(self.id.as_str()))
            .field("long_name", &Anonymized(self.long_name.as_str()))
            .field("short_name", &Anonymized(self.short_name.as_str()))
            .field("hw_model", &self.hw_model)
            .field("is_licensed", &self.is_licensed)
            .finish()
    }
}

impl fmt::Debug for PositionUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionUpdate")
            .field("num", &Anonymized(&self.num))
            .field("latitude_i", &Anonymized(&self.latitude_i))
            .field("longitude_i", &Anonymized(&self.longitude_i))
            .field("altitude", &Anonymized(&self.altitude))
            .field("time", &self.time)
            .finish()
    }
}

fn default_snr() -> f32 {
    SNR_UNKNOWN
}

fn default_rssi() -> i32 {
    RSSI_UNKNOWN
}

// ----------------------------------------------------------------------------
// Mesh Event
// ----------------------------------------------------------------------------

/// One decoded protocol event addressed to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshEvent {
    Identity(IdentityUpdate),
    Position(PositionUpdate),
    DeviceMetrics(DeviceMetricsUpdate),
    EnvironmentMetrics(EnvironmentMetricsUpdate),
    LinkQuality(LinkQualityUpdate),
}

impl MeshEvent {
    /// The node this event is about
    pub fn num(&self) -> NodeNum {
        let raw = match self {
            MeshEvent::Identity(u) => u.num,
            MeshEvent::Position(u) => u.num,
            MeshEvent::DeviceMetrics(u) => u.num,
            MeshEvent::EnvironmentMetrics(u) => u.num,
            MeshEvent::LinkQuality(u) => u.num,
        };
        NodeNum::new(raw)
    }

    /// Short name of the event kind for logging
    pub fn kind(&self) -> &'static str {
        match self {
            MeshEvent::Identity(_) => "identity",
            MeshEvent::Position(_) => "position",
            MeshEvent::DeviceMetrics(_) => "device_metrics",
            MeshEvent::EnvironmentMetrics(_) => "environment_metrics",
            MeshEvent::LinkQuality(_) => "link_quality",
        }
    }

    /// Map the event onto the partial record update it implies
    ///
    /// `default_time` stands in for timestamps the sender left unspecified.
    pub fn to_update(&self, default_time: Timestamp) -> NodeUpdate {
        match self {
            MeshEvent::Identity(u) => NodeUpdate::identity(MeshUser::from_wire(u)),
            MeshEvent::Position(u) => NodeUpdate::position(Position::from_wire(u, default_time)),
            MeshEvent::DeviceMetrics(u) => {
                NodeUpdate::device_metrics(DeviceMetrics::from_wire(u, default_time))
            }
            MeshEvent::EnvironmentMetrics(u) => {
                NodeUpdate::environment_metrics(EnvironmentMetrics::from_wire(u, default_time))
            }
            MeshEvent::LinkQuality(u) => NodeUpdate::link_quality(LinkQuality::from_wire(u)),
        }
    }
}
