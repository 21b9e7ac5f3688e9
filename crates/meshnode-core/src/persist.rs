//! Persisted row layout
//!
//! The storage collaborator keeps one flat row per node, keyed by `num`. The
//! embedded structures are flattened into columns under the prefixes `user_`,
//! `position_`, `devMetrics_` and `envMetrics_`, and link quality keeps its
//! wire sentinels. Only `num` is required. Every other column may be missing:
//! a structure is only restored when all of its required columns are present.

use serde::{Deserialize, Serialize};

use crate::node::NodeRecord;
use crate::registry::NodeUpdate;
use crate::telemetry::{
    DeviceMetrics, EnvironmentMetrics, HardwareModel, LinkQuality, MeshUser, Position,
};
use crate::types::{NodeNum, Timestamp};
use crate::wire::{LinkQualityUpdate, HOP_LIMIT_UNSET, RSSI_UNKNOWN, SNR_UNKNOWN};

/// One stored node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub num: i32,

    #[serde(rename = "user_id")]
    pub user_id: Option<String>,
    #[serde(rename = "user_longName")]
    pub user_long_name: Option<String>,
    #[serde(rename = "user_shortName")]
    pub user_short_name: Option<String>,
    #[serde(rename = "user_hwModel")]
    pub user_hw_model: Option<i32>,
    #[serde(rename = "user_isLicensed")]
    pub user_is_licensed: Option<bool>,

    #[serde(rename = "position_latitude")]
    pub position_latitude: Option<f64>,
    #[serde(rename = "position_longitude")]
    pub position_longitude: Option<f64>,
    #[serde(rename = "position_altitude")]
    pub position_altitude: Option<i32>,
    #[serde(rename = "position_time")]
    pub position_time: Option<i32>,

    #[serde(default = "unknown_snr")]
    pub snr: f32,
    #[serde(default = "unknown_rssi")]
    pub rssi: i32,
    #[serde(rename = "hopLimit")]
    pub hop_limit: Option<i32>,
    #[serde(rename = "lastHeard", default)]
    pub last_heard: i32,
    #[serde(default)]
    pub channel: i32,

    #[serde(rename = "devMetrics_time")]
    pub dev_metrics_time: Option<i32>,
    #[serde(rename = "devMetrics_batteryLevel")]
    pub dev_metrics_battery_level: Option<i32>,
    #[serde(rename = "devMetrics_voltage")]
    pub dev_metrics_voltage: Option<f32>,
    #[serde(rename = "devMetrics_channelUtilization")]
    pub dev_metrics_channel_utilization: Option<f32>,
    #[serde(rename = "devMetrics_airUtilTx")]
    pub dev_metrics_air_util_tx: Option<f32>,

    #[serde(rename = "envMetrics_time")]
    pub env_metrics_time: Option<i32>,
    #[serde(rename = "envMetrics_temperature")]
    pub env_metrics_temperature: Option<f32>,
    #[serde(rename = "envMetrics_relativeHumidity")]
    pub env_metrics_relative_humidity: Option<f32>,
    #[serde(rename = "envMetrics_barometricPressure")]
    pub env_metrics_barometric_pressure: Option<f32>,
    #[serde(rename = "envMetrics_gasResistance")]
    pub env_metrics_gas_resistance: Option<f32>,
    #[serde(rename = "envMetrics_voltage")]
    pub env_metrics_voltage: Option<f32>,
    #[serde(rename = "envMetrics_current")]
    pub env_metrics_current: Option<f32>,
}

fn unknown_snr() -> f32 {
    SNR_UNKNOWN
}

fn unknown_rssi() -> i32 {
    RSSI_UNKNOWN
}

impl NodeRow {
    /// Row for a node nothing is known about yet
    pub fn empty(num: NodeNum) -> Self {
        Self {
            num: num.to_wire(),
            user_id: None,
            user_long_name: None,
            user_short_name: None,
            user_hw_model: None,
            user_is_licensed: None,
            position_latitude: None,
            position_longitude: None,
            position_altitude: None,
            position_time: None,
            snr: SNR_UNKNOWN,
            rssi: RSSI_UNKNOWN,
            hop_limit: Some(HOP_LIMIT_UNSET),
            last_heard: 0,
            channel: 0,
            dev_metrics_time: None,
            dev_metrics_battery_level: None,
            dev_metrics_voltage: None,
            dev_metrics_channel_utilization: None,
            dev_metrics_air_util_tx: None,
            env_metrics_time: None,
            env_metrics_temperature: None,
            env_metrics_relative_humidity: None,
            env_metrics_barometric_pressure: None,
            env_metrics_gas_resistance: None,
            env_metrics_voltage: None,
            env_metrics_current: None,
        }
    }

    /// Flatten a record into a row
    pub fn from_record(node: &NodeRecord) -> Self {
        let mut row = Self::empty(node.num());

        if let Some(user) = node.user() {
            row.user_id = Some(user.id.clone());
            row.user_long_name = Some(user.long_name.clone());
            row.user_short_name = Some(user.short_name.clone());
            row.user_hw_model = Some(user.hw_model.to_wire());
            row.user_is_licensed = Some(user.is_licensed);
        }

        if let Some(position) = node.position() {
            row.position_latitude = Some(position.latitude);
            row.position_longitude = Some(position.longitude);
            row.position_altitude = Some(position.altitude);
            row.position_time = Some(position.time.to_wire());
        }

        let link = node.link_quality();
        row.snr = link.snr.unwrap_or(SNR_UNKNOWN);
        row.rssi = link.rssi.unwrap_or(RSSI_UNKNOWN);
        row.hop_limit = Some(
            link.hop_limit
                .and_then(|h| i32::try_from(h).ok())
                .unwrap_or(HOP_LIMIT_UNSET),
        );
        row.last_heard = link.last_heard.to_wire();
        row.channel = i32::try_from(link.channel).unwrap_or(i32::MAX);

        if let Some(metrics) = node.device_metrics() {
            row.dev_metrics_time = Some(metrics.time.to_wire());
            row.dev_metrics_battery_level = Some(metrics.battery_level);
            row.dev_metrics_voltage = Some(metrics.voltage);
            row.dev_metrics_channel_utilization = Some(metrics.channel_utilization);
            row.dev_metrics_air_util_tx = Some(metrics.air_util_tx);
        }

        if let Some(env) = node.environment_metrics() {
            row.env_metrics_time = Some(env.time.to_wire());
            row.env_metrics_temperature = Some(env.temperature);
            row.env_metrics_relative_humidity = Some(env.relative_humidity);
            row.env_metrics_barometric_pressure = Some(env.barometric_pressure);
            row.env_metrics_gas_resistance = Some(env.gas_resistance);
            row.env_metrics_voltage = Some(env.voltage);
            row.env_metrics_current = Some(env.current);
        }

        row
    }

    pub fn node_num(&self) -> NodeNum {
        NodeNum::from_wire(self.num)
    }

    fn user(&self) -> Option<MeshUser> {
        Some(MeshUser::new(
            self.user_id.clone()?,
            self.user_long_name.clone()?,
            self.user_short_name.clone()?,
            HardwareModel::from_wire(self.user_hw_model?),
            self.user_is_licensed.unwrap_or(false),
        ))
    }

    fn position(&self) -> Option<Position> {
        Some(Position::new(
            self.position_latitude?,
            self.position_longitude?,
            self.position_altitude.unwrap_or(0),
            Timestamp::from_wire(self.position_time?),
        ))
    }

    fn device_metrics(&self) -> Option<DeviceMetrics> {
        Some(DeviceMetrics {
            time: Timestamp::from_wire(self.dev_metrics_time?),
            battery_level: self.dev_metrics_battery_level?,
            voltage: self.dev_metrics_voltage?,
            channel_utilization: self.dev_metrics_channel_utilization?,
            air_util_tx: self.dev_metrics_air_util_tx?,
        })
    }

    fn environment_metrics(&self) -> Option<EnvironmentMetrics> {
        Some(EnvironmentMetrics {
            time: Timestamp::from_wire(self.env_metrics_time?),
            temperature: self.env_metrics_temperature?,
            relative_humidity: self.env_metrics_relative_humidity?,
            barometric_pressure: self.env_metrics_barometric_pressure?,
            gas_resistance: self.env_metrics_gas_resistance?,
            voltage: self.env_metrics_voltage?,
            current: self.env_metrics_current?,
        })
    }

    fn link_quality(&self) -> LinkQuality {
        LinkQuality::from_wire(&LinkQualityUpdate {
            num: self.num as u32,
            snr: self.snr,
            rssi: self.rssi,
            hop_limit: self.hop_limit.unwrap_or(HOP_LIMIT_UNSET),
            channel: self.channel,
            last_heard: self.last_heard,
        })
    }

    /// The node number and the update that recreates the stored record
    pub fn into_update(self) -> (NodeNum, NodeUpdate) {
        let update = NodeUpdate {
            user: self.user(),
            position: self.position(),
            device_metrics: self.device_metrics(),
            environment_metrics: self.environment_metrics(),
            link_quality: Some(self.link_quality()),
        };
        (self.node_num(), update)
    }

    /// Rebuild the record this row stores
    pub fn to_record(&self) -> NodeRecord {
        let (num, update) = self.clone().into_update();
        NodeRecord::new(num).with_update(&update)
    }
}
