//! Last-known node position

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::anonymize::Anonymized;
use crate::decimal::format_plain;
use crate::geo::{self, CoordinateFormat, GeoPoint};
use crate::types::Timestamp;
use crate::wire::PositionUpdate;

/// Degrees per wire unit
const WIRE_SCALE: f64 = 1e-7;

/// Convert a 1e-7 degree wire integer to degrees
pub fn deg_d(i: i32) -> f64 {
    i as f64 * WIRE_SCALE
}

/// Convert degrees to the 1e-7 degree wire integer (rounded, saturating)
pub fn deg_i(d: f64) -> i32 {
    (d * 1e7).round() as i32
}

/// A reported position fix
///
/// Positions are accepted as reported; [`Position::is_valid`] decides whether a
/// fix can be used. The GPS of many devices reports `(0, 0)` before it has a
/// fix, so that point is never valid.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: i32,
    /// When the fix was taken
    pub time: Timestamp,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: i32, time: Timestamp) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            time,
        }
    }

    /// Build from a decoded wire record; a zero wire time is replaced by `default_time`
    pub fn from_wire(update: &PositionUpdate, default_time: Timestamp) -> Self {
        let time = if update.time != 0 {
            Timestamp::from_wire(update.time)
        } else {
            default_time
        };

        Self {
            latitude: deg_d(update.latitude_i),
            longitude: deg_d(update.longitude_i),
            altitude: update.altitude,
            time,
        }
    }

    /// Latitude as a wire integer
    pub fn latitude_i(&self) -> i32 {
        deg_i(self.latitude)
    }

    /// Longitude as a wire integer
    pub fn longitude_i(&self) -> i32 {
        deg_i(self.longitude)
    }

    /// Both coordinates non-zero and inside their physical ranges
    pub fn is_valid(&self) -> bool {
        self.latitude != 0.0
            && self.longitude != 0.0
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Great-circle distance in meters
    pub fn distance(&self, other: &Position) -> f64 {
        geo::distance_meters(self.point(), other.point())
    }

    /// Initial bearing towards `other` in degrees, `[0, 360)`
    pub fn bearing(&self, other: &Position) -> f64 {
        geo::bearing_degrees(self.point(), other.point())
    }

    /// Coordinates rendered in the selected display format
    pub fn gps_string(&self, format: CoordinateFormat) -> String {
        geo::format_coordinate(self.point(), format)
    }

    /// Geohash of `len` characters, `None` for out-of-range coordinates
    pub fn geohash(&self, len: usize) -> Option<String> {
        self.point().to_geohash(len)
    }

    /// `geo:` URI for handing the position to a map application
    ///
    /// Coordinates always carry a fraction part, `geo:45.0,-122.0`.
    pub fn geo_uri(&self, label: &str) -> String {
        let label: String = url::form_urlencoded::byte_serialize(label.as_bytes()).collect();
        format!(
            "geo:{},{}?z=17&label={}",
            format_plain(self.latitude),
            format_plain(self.longitude),
            label
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("latitude", &Anonymized(&self.latitude))
            .field("longitude", &Anonymized(&self.longitude))
            .field("altitude", &Anonymized(&self.altitude))
            .field("time", &self.time.as_secs())
            .finish()
    }
}
