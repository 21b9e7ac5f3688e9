//! Device and environment telemetry

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;
use crate::wire::{DeviceMetricsUpdate, EnvironmentMetricsUpdate};

/// Battery level reported while running from external power
pub const BATTERY_LEVEL_EXTERNAL_POWER: i32 = 101;

/// Telemetry time, falling back to `default_time` when absent or zero
fn telemetry_time(time: Option<i32>, default_time: Timestamp) -> Timestamp {
    match time {
        Some(secs) if secs != 0 => Timestamp::from_wire(secs),
        _ => default_time,
    }
}

// ----------------------------------------------------------------------------
// Device Metrics
// ----------------------------------------------------------------------------

/// Power and airtime figures a node reports about itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    pub time: Timestamp,
    /// 0-100 percent, 101 on external power, anything else unknown
    pub battery_level: i32,
    pub voltage: f32,
    /// Percent of airtime in use on the channel
    pub channel_utilization: f32,
    /// Percent of airtime this node used for transmitting
    pub air_util_tx: f32,
}

impl DeviceMetrics {
    /// Build from a decoded wire record
    pub fn from_wire(update: &DeviceMetricsUpdate, default_time: Timestamp) -> Self {
        Self {
            time: telemetry_time(update.time, default_time),
            battery_level: update.battery_level,
            voltage: update.voltage,
            channel_utilization: update.channel_utilization,
            air_util_tx: update.air_util_tx,
        }
    }

    /// Whether the battery level is a real percentage
    pub fn has_battery_percentage(&self) -> bool {
        (0..=100).contains(&self.battery_level)
    }

    pub fn is_externally_powered(&self) -> bool {
        self.battery_level == BATTERY_LEVEL_EXTERNAL_POWER
    }
}

// ----------------------------------------------------------------------------
// Environment Metrics
// ----------------------------------------------------------------------------

/// Readings from an attached environment sensor
///
/// A field equal to exactly `0.0` means the sensor did not report it. A real
/// zero reading cannot be told apart from a missing sensor; the upstream
/// format has the same limitation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMetrics {
    pub time: Timestamp,
    /// Degrees Celsius
    pub temperature: f32,
    /// Percent
    pub relative_humidity: f32,
    /// Hectopascal
    pub barometric_pressure: f32,
    /// Megaohm
    pub gas_resistance: f32,
    /// Volt
    pub voltage: f32,
    /// Milliampere
    pub current: f32,
}

impl EnvironmentMetrics {
    /// Build from a decoded wire record
    pub fn from_wire(update: &EnvironmentMetricsUpdate, default_time: Timestamp) -> Self {
        Self {
            time: telemetry_time(update.time, default_time),
            temperature: update.temperature,
            relative_humidity: update.relative_humidity,
            barometric_pressure: update.barometric_pressure,
            gas_resistance: update.gas_resistance,
            voltage: update.voltage,
            current: update.current,
        }
    }

    fn present(value: f32) -> Option<f32> {
        if value != 0.0 {
            Some(value)
        } else {
            None
        }
    }

    pub fn temperature(&self) -> Option<f32> {
        Self::present(self.temperature)
    }

    pub fn relative_humidity(&self) -> Option<f32> {
        Self::present(self.relative_humidity)
    }

    pub fn barometric_pressure(&self) -> Option<f32> {
        Self::present(self.barometric_pressure)
    }

    pub fn gas_resistance(&self) -> Option<f32> {
        Self::present(self.gas_resistance)
    }

    pub fn voltage(&self) -> Option<f32> {
        Self::present(self.voltage)
    }

    pub fn current(&self) -> Option<f32> {
        Self::present(self.current)
    }

    /// True when no field carries a reading
    pub fn is_empty(&self) -> bool {
        self.temperature().is_none()
            && self.relative_humidity().is_none()
            && self.barometric_pressure().is_none()
            && self.gas_resistance().is_none()
            && self.voltage().is_none()
            && self.current().is_none()
    }
}
