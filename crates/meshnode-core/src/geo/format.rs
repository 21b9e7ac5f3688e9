//! Coordinate rendering
//!
//! Maps a point plus the display format selected in the device configuration
//! to a string. Formats the device reports that this crate does not render
//! fall back to decimal degrees, as do UTM/MGRS requests outside the latitude
//! band those grids cover.

use core::fmt;
use serde::{Deserialize, Serialize};

use super::utm::{MgrsCoord, UtmCoord};
use super::GeoPoint;

// ----------------------------------------------------------------------------
// Coordinate Format
// ----------------------------------------------------------------------------

/// Coordinate display format, numbered as in the device display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "WireEnumRepr", into = "WireEnumRepr")]
pub enum CoordinateFormat {
    /// Decimal degrees
    #[default]
    Dec,
    /// Degrees, minutes, seconds
    Dms,
    /// Universal Transverse Mercator
    Utm,
    /// Military Grid Reference System
    Mgrs,
    /// A format this crate does not render; shown as decimal degrees
    Other(i32),
}

impl CoordinateFormat {
    /// Map the device's numeric format value
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => Self::Dec,
            1 => Self::Dms,
            2 => Self::Utm,
            3 => Self::Mgrs,
            other => Self::Other(other),
        }
    }

    /// The numeric value used by the device configuration
    pub fn to_wire(self) -> i32 {
        match self {
            Self::Dec => 0,
            Self::Dms => 1,
            Self::Utm => 2,
            Self::Mgrs => 3,
            Self::Other(value) => value,
        }
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Self::Dec => Some("dec"),
            Self::Dms => Some("dms"),
            Self::Utm => Some("utm"),
            Self::Mgrs => Some("mgrs"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.to_wire()),
        }
    }
}

/// Serialized form shared by the configuration enums: a lowercase name for
/// known values, the raw device number otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireEnumRepr {
    Name(String),
    Wire(i32),
}

impl TryFrom<WireEnumRepr> for CoordinateFormat {
    type Error = String;

    fn try_from(repr: WireEnumRepr) -> Result<Self, Self::Error> {
        match repr {
            WireEnumRepr::Wire(value) => Ok(Self::from_wire(value)),
            WireEnumRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "dec" => Ok(Self::Dec),
                "dms" => Ok(Self::Dms),
                "utm" => Ok(Self::Utm),
                "mgrs" => Ok(Self::Mgrs),
                _ => Err(format!("unknown coordinate format: {}", name)),
            },
        }
    }
}

impl From<CoordinateFormat> for WireEnumRepr {
    fn from(format: CoordinateFormat) -> Self {
        match format.name() {
            Some(name) => WireEnumRepr::Name(name.to_string()),
            None => WireEnumRepr::Wire(format.to_wire()),
        }
    }
}

// ----------------------------------------------------------------------------
// Rendering
// ----------------------------------------------------------------------------

/// Render `point` in the selected format
pub fn format_coordinate(point: GeoPoint, format: CoordinateFormat) -> String {
    match format {
        CoordinateFormat::Dec | CoordinateFormat::Other(_) => format_dec(point),
        CoordinateFormat::Dms => format_dms(point),
        CoordinateFormat::Utm => UtmCoord::from_point(point)
            .map(|utm| utm.to_string())
            .unwrap_or_else(|| format_dec(point)),
        CoordinateFormat::Mgrs => MgrsCoord::from_point(point)
            .map(|mgrs| mgrs.to_string())
            .unwrap_or_else(|| format_dec(point)),
    }
}

/// Decimal degrees with five decimals, latitude first
pub fn format_dec(point: GeoPoint) -> String {
    format!("{:.5} {:.5}", point.latitude, point.longitude)
}

/// Degrees, minutes and seconds for both axes, latitude first
pub fn format_dms(point: GeoPoint) -> String {
    format!(
        "{} {}",
        dms_axis(point.latitude, 'N', 'S'),
        dms_axis(point.longitude, 'E', 'W')
    )
}

fn dms_axis(degrees: f64, positive: char, negative: char) -> String {
    let hemisphere = if degrees < 0.0 { negative } else { positive };

    // Work in whole milliseconds of arc so minutes and seconds never round up to 60
    let total_ms = (degrees.abs() * 3_600_000.0).round() as u64;
    let deg = total_ms / 3_600_000;
    let min = (total_ms / 60_000) % 60;
    let sec_ms = total_ms % 60_000;

    let seconds = format!("{}.{:03}", sec_ms / 1000, sec_ms % 1000);
    let seconds: String = seconds.chars().take(5).collect();

    format!("{}°{}'{}\"{}", deg, min, seconds, hemisphere)
}
