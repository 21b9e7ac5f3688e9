//! Geographic utilities
//!
//! Pure functions over latitude/longitude pairs: great-circle distance, initial
//! bearing, and coordinate rendering in the formats a node list can display.

pub mod distance;
pub mod format;
pub mod utm;

use serde::{Deserialize, Serialize};

pub use distance::{bearing_degrees, distance_meters, EARTH_RADIUS_METERS};
pub use format::{format_coordinate, format_dec, format_dms, CoordinateFormat};
pub use utm::{MgrsCoord, UtmCoord};

/// A geographic point in degrees
///
/// No range check happens here; validity of a reported fix is decided by
/// [`crate::Position::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic point
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates fall inside the physical ranges
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Encode this point as a geohash of `len` characters
    pub fn to_geohash(&self, len: usize) -> Option<String> {
        if !self.in_range() {
            return None;
        }
        geohash::encode(
            geohash::Coord {
                x: self.longitude,
                y: self.latitude,
            },
            len,
        )
        .ok()
    }
}
