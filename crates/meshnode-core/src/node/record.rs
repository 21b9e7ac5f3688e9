//! Per-node record and the facts derived from it

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::anonymize::Anonymized;
use crate::config::UnitSystem;
use crate::decimal::format_fixed;
use crate::registry::NodeUpdate;
use crate::telemetry::{DeviceMetrics, EnvironmentMetrics, LinkQuality, MeshUser, Position};
use crate::types::{NodeNum, Timestamp};

/// A node counts as online when heard within this many seconds
pub const ONLINE_WINDOW_SECS: i64 = 15 * 60;

const FEET_PER_METER: f64 = 3.281;
const METERS_PER_MILE: f64 = 1609.34;
/// Imperial output switches to miles at this many whole meters
const MILE_THRESHOLD_METERS: i32 = 1609;

// ----------------------------------------------------------------------------
// Colors
// ----------------------------------------------------------------------------

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from the low 24 bits of `value`
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Perceptual luminance in `[0, 1]`
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ----------------------------------------------------------------------------
// Battery Status
// ----------------------------------------------------------------------------

/// Battery state as shown next to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatteryStatus {
    /// Running on battery with a known charge
    Level { percent: u8, voltage: f32 },
    /// Running from external power
    ExternalPower,
    /// No device metrics, or a level outside the known range
    Unknown,
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryStatus::Level { percent, voltage } => {
                write!(f, "{}% {}V", percent, format_fixed(f64::from(*voltage), 2))
            }
            BatteryStatus::ExternalPower => Ok(()),
            BatteryStatus::Unknown => f.write_str("?"),
        }
    }
}

// ----------------------------------------------------------------------------
// Node Record
// ----------------------------------------------------------------------------

/// Everything currently known about one node
///
/// Records are values: the registry never changes one in place, it builds the
/// next version with [`NodeRecord::with_update`] and swaps it in.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    num: NodeNum,
    user: Option<MeshUser>,
    position: Option<Position>,
    snr: Option<f32>,
    rssi: Option<i32>,
    hop_limit: Option<u32>,
    last_heard: Timestamp,
    device_metrics: Option<DeviceMetrics>,
    environment_metrics: Option<EnvironmentMetrics>,
    channel: u32,
}

impl NodeRecord {
    /// A record that knows nothing but its number
    pub fn new(num: NodeNum) -> Self {
        Self {
            num,
            user: None,
            position: None,
            snr: None,
            rssi: None,
            hop_limit: None,
            last_heard: Timestamp::NEVER,
            device_metrics: None,
            environment_metrics: None,
            channel: 0,
        }
    }

    /// The next version of this record with the present parts of `update` applied
    pub fn with_update(&self, update: &NodeUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }

    pub(crate) fn apply(&mut self, update: &NodeUpdate) {
        if let Some(user) = &update.user {
            self.user = Some(user.clone());
        }
        if let Some(position) = update.position {
            self.position = Some(position);
        }
        if let Some(metrics) = update.device_metrics {
            self.device_metrics = Some(metrics);
        }
        if let Some(metrics) = update.environment_metrics {
            self.environment_metrics = Some(metrics);
        }
        if let Some(link) = update.link_quality {
            self.apply_link_quality(link);
        }
    }

    fn apply_link_quality(&mut self, link: LinkQuality) {
        self.snr = link.snr;
        self.rssi = link.rssi;
        self.hop_limit = link.hop_limit;
        self.channel = link.channel;
        self.last_heard = link.last_heard;
    }

    pub fn num(&self) -> NodeNum {
        self.num
    }

    pub fn user(&self) -> Option<&MeshUser> {
        self.user.as_ref()
    }

    /// The stored position, valid or not
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn snr(&self) -> Option<f32> {
        self.snr
    }

    pub fn rssi(&self) -> Option<i32> {
        self.rssi
    }

    pub fn hop_limit(&self) -> Option<u32> {
        self.hop_limit
    }

    pub fn last_heard(&self) -> Timestamp {
        self.last_heard
    }

    pub fn device_metrics(&self) -> Option<&DeviceMetrics> {
        self.device_metrics.as_ref()
    }

    pub fn environment_metrics(&self) -> Option<&EnvironmentMetrics> {
        self.environment_metrics.as_ref()
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// Link-quality view of the record
    pub fn link_quality(&self) -> LinkQuality {
        LinkQuality {
            snr: self.snr,
            rssi: self.rssi,
            hop_limit: self.hop_limit,
            channel: self.channel,
            last_heard: self.last_heard,
        }
    }

    // ------------------------------------------------------------------------
    // Derived Facts
    // ------------------------------------------------------------------------

    /// Heard from within the last fifteen minutes
    pub fn is_online(&self, now: Timestamp) -> bool {
        now - self.last_heard <= ONLINE_WINDOW_SECS
    }

    /// The stored position, only if it is usable
    pub fn valid_position(&self) -> Option<&Position> {
        self.position.as_ref().filter(|p| p.is_valid())
    }

    /// Whole meters to `other`, when both nodes have a valid position
    pub fn distance_to(&self, other: &NodeRecord) -> Option<i32> {
        let (a, b) = (self.valid_position()?, other.valid_position()?);
        Some(a.distance(b) as i32)
    }

    /// Whole degrees from this node towards `other`
    pub fn bearing_to(&self, other: &NodeRecord) -> Option<i32> {
        let (a, b) = (self.valid_position()?, other.valid_position()?);
        Some(a.bearing(b) as i32)
    }

    /// Distance to `other` in the selected unit system
    ///
    /// `None` for unknown or zero distance and for unrecognized unit systems.
    pub fn formatted_distance(&self, other: &NodeRecord, units: UnitSystem) -> Option<String> {
        let dist = self.distance_to(other)?;
        if dist == 0 {
            return None;
        }

        let meters = f64::from(dist);
        let (value, decimals, unit) = match units {
            UnitSystem::Metric if dist < 1000 => (meters, 0, "m"),
            UnitSystem::Metric => (meters / 1000.0, 1, "km"),
            UnitSystem::Imperial if dist < MILE_THRESHOLD_METERS => {
                (meters * FEET_PER_METER, 0, "ft")
            }
            UnitSystem::Imperial => (meters / METERS_PER_MILE, 1, "mi"),
            UnitSystem::Unrecognized(_) => return None,
        };
        Some(format!("{} {}", format_fixed(value, decimals), unit))
    }

    /// `"{level}%"` for a battery level of 1 to 100, empty otherwise
    pub fn battery_label(&self) -> String {
        match self.device_metrics.map(|m| m.battery_level) {
            Some(level @ 1..=100) => format!("{}%", level),
            _ => String::new(),
        }
    }

    pub fn battery_status(&self) -> BatteryStatus {
        let Some(metrics) = self.device_metrics else {
            return BatteryStatus::Unknown;
        };
        match u8::try_from(metrics.battery_level) {
            Ok(percent) if percent <= 100 => BatteryStatus::Level {
                percent,
                voltage: metrics.voltage,
            },
            _ if metrics.is_externally_powered() => BatteryStatus::ExternalPower,
            _ => BatteryStatus::Unknown,
        }
    }

    /// Present environment readings in a fixed order, each followed by a space
    /// except the trailing current reading
    pub fn environment_summary(&self, use_fahrenheit: bool) -> String {
        let Some(env) = self.environment_metrics else {
            return String::new();
        };

        let mut out = String::new();
        let mut push = |value: f32, decimals: usize, unit: &str| {
            out.push_str(&format_fixed(f64::from(value), decimals));
            out.push_str(unit);
        };
        if let Some(c) = env.temperature() {
            if use_fahrenheit {
                push(c * 1.8 + 32.0, 1, "°F ");
            } else {
                push(c, 1, "°C ");
            }
        }
        if let Some(v) = env.relative_humidity() {
            push(v, 0, "% ");
        }
        if let Some(v) = env.barometric_pressure() {
            push(v, 1, "hPa ");
        }
        if let Some(v) = env.gas_resistance() {
            push(v, 0, "MΩ ");
        }
        if let Some(v) = env.voltage() {
            push(v, 2, "V ");
        }
        if let Some(v) = env.current() {
            push(v, 1, "mA");
        }
        out
    }

    /// Radio line shown under a node
    ///
    /// The local node shows its airtime figures; remote nodes show the channel
    /// and the link quality of the last packet, when known.
    pub fn signal_summary(&self, is_local: bool) -> Option<String> {
        if is_local {
            return self.device_metrics.map(|m| {
                format!(
                    "ChUtil {}% AirUtilTX {}%",
                    format_fixed(f64::from(m.channel_utilization), 1),
                    format_fixed(f64::from(m.air_util_tx), 1)
                )
            });
        }

        let mut parts = Vec::with_capacity(2);
        if self.channel > 0 {
            parts.push(format!("ch:{}", self.channel));
        }
        if let (Some(snr), Some(rssi)) = (self.snr, self.rssi) {
            if snr < 100.0 && rssi < 0 {
                parts.push(format!(
                    "rssi:{} snr:{} hops:{}",
                    rssi,
                    format_fixed(f64::from(snr), 1),
                    self.hop_limit.unwrap_or(0)
                ));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// `(foreground, background)` derived from the node number
    pub fn color_pair(&self) -> (Rgb, Rgb) {
        let background = Rgb::from_u32(self.num.value());
        let foreground = if background.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        };
        (foreground, background)
    }

    pub fn display_short_name(&self) -> &str {
        self.user.as_ref().map_or("UNK", |u| u.short_name.as_str())
    }

    pub fn display_long_name(&self) -> &str {
        self.user.as_ref().map_or("Unknown", |u| u.long_name.as_str())
    }
}

impl fmt::Debug for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRecord")
            .field("num", &Anonymized(&self.num))
            .field("user", &self.user)
            .field("position", &self.position)
            .field("snr", &self.snr)
            .field("rssi", &self.rssi)
            .field("hop_limit", &self.hop_limit)
            .field("last_heard", &self.last_heard.as_secs())
            .field("device_metrics", &self.device_metrics)
            .field("environment_metrics", &self.environment_metrics)
            .field("channel", &self.channel)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
