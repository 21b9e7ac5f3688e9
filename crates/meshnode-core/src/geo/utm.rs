//! UTM and MGRS grid coordinates on the WGS84 ellipsoid
//!
//! Forward transverse Mercator projection (Snyder's series), with the
//! Norway and Svalbard zone exceptions. Both grids are defined only between
//! 80°S and 84°N; outside that band conversion yields `None`.

use core::fmt;

use super::GeoPoint;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const MIN_LATITUDE: f64 = -80.0;
const MAX_LATITUDE: f64 = 84.0;

const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";
const MGRS_COLUMN_SETS: [&[u8]; 3] = [b"STUVWXYZ", b"ABCDEFGH", b"JKLMNPQR"];
const MGRS_ROW_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

// ----------------------------------------------------------------------------
// UTM
// ----------------------------------------------------------------------------

/// A UTM grid reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoord {
    /// Longitudinal zone (1-60)
    pub zone: u8,
    /// Latitude band letter (C-X, without I and O)
    pub band: char,
    /// Easting in meters
    pub easting: f64,
    /// Northing in meters (false northing applied south of the equator)
    pub northing: f64,
}

impl UtmCoord {
    /// Project a point, or `None` outside the UTM latitude band
    pub fn from_point(point: GeoPoint) -> Option<Self> {
        let lat = point.latitude;
        let lon = point.longitude;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }

        let zone = zone_number(lat, lon);
        let band = latitude_band(lat)?;
        let (easting, northing) = project(lat, lon, central_meridian(zone));

        Some(Self {
            zone,
            band,
            easting,
            northing,
        })
    }
}

impl fmt::Display for UtmCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone,
            self.band,
            self.easting.floor() as i64,
            self.northing.floor() as i64
        )
    }
}

/// Longitudinal zone number including the Norway and Svalbard exceptions
pub fn zone_number(lat: f64, lon: f64) -> u8 {
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }

    if (72.0..=84.0).contains(&lat) {
        if (0.0..9.0).contains(&lon) {
            return 31;
        } else if (9.0..21.0).contains(&lon) {
            return 33;
        } else if (21.0..33.0).contains(&lon) {
            return 35;
        } else if (33.0..42.0).contains(&lon) {
            return 37;
        }
    }

    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Latitude band letter; band X is stretched to cover 72°N-84°N
pub fn latitude_band(lat: f64) -> Option<char> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return None;
    }
    let index = (((lat - MIN_LATITUDE) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1);
    Some(BAND_LETTERS[index] as char)
}

fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
}

fn project(lat_deg: f64, lon_deg: f64, lon0_deg: f64) -> (f64, f64) {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let phi = lat_deg.to_radians();
    let dlambda = (lon_deg - lon0_deg).to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let n = WGS84_A / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * dlambda;

    let m = WGS84_A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

    let easting = SCALE_FACTOR
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + FALSE_EASTING;

    let mut northing = SCALE_FACTOR
        * (m + n
            * tan_phi
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    if lat_deg < 0.0 {
        northing += FALSE_NORTHING_SOUTH;
    }

    (easting, northing)
}

// ----------------------------------------------------------------------------
// MGRS
// ----------------------------------------------------------------------------

/// An MGRS grid reference at 1 m precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgrsCoord {
    pub zone: u8,
    pub band: char,
    /// 100 km square column letter
    pub column: char,
    /// 100 km square row letter
    pub row: char,
    /// Easting within the square (0-99999)
    pub easting: u32,
    /// Northing within the square (0-99999)
    pub northing: u32,
}

impl MgrsCoord {
    /// Convert a point, or `None` outside the UTM latitude band
    pub fn from_point(point: GeoPoint) -> Option<Self> {
        UtmCoord::from_point(point).map(Self::from_utm)
    }

    /// Derive the MGRS reference from a UTM one (AA lettering scheme)
    pub fn from_utm(utm: UtmCoord) -> Self {
        let easting = utm.easting.floor().max(0.0) as u64;
        let northing = utm.northing.floor().max(0.0) as u64;

        let set = MGRS_COLUMN_SETS[(utm.zone % 3) as usize];
        let column_index = ((easting / 100_000) as usize).clamp(1, set.len()) - 1;
        let column = set[column_index] as char;

        let row_offset = if utm.zone % 2 == 0 { 5 } else { 0 };
        let row_index = ((northing / 100_000) as usize + row_offset) % MGRS_ROW_LETTERS.len();
        let row = MGRS_ROW_LETTERS[row_index] as char;

        Self {
            zone: utm.zone,
            band: utm.band,
            column,
            row,
            easting: (easting % 100_000) as u32,
            northing: (northing % 100_000) as u32,
        }
    }
}

impl fmt::Display for MgrsCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{} {}{} {:05} {:05}",
            self.zone, self.band, self.column, self.row, self.easting, self.northing
        )
    }
}
