//! Display Configuration
//!
//! The subset of the device configuration that shapes how node facts are
//! presented: coordinate format, unit system, temperature unit, and the list of
//! nodes the user chose to ignore. The ignore list is only used to mark nodes in
//! the presentation; the registry still tracks them.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::errors::{MeshError, Result};
use crate::geo::format::WireEnumRepr;
use crate::types::NodeNum;

pub use crate::geo::CoordinateFormat;

// ----------------------------------------------------------------------------
// Unit System
// ----------------------------------------------------------------------------

/// Unit system for distances, numbered as in the device display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "WireEnumRepr", into = "WireEnumRepr")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    /// A value this crate does not know; distances are not rendered
    Unrecognized(i32),
}

impl UnitSystem {
    /// Map the device's numeric unit value
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => Self::Metric,
            1 => Self::Imperial,
            other => Self::Unrecognized(other),
        }
    }

    /// The numeric value used by the device configuration
    pub fn to_wire(self) -> i32 {
        match self {
            Self::Metric => 0,
            Self::Imperial => 1,
            Self::Unrecognized(value) => value,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => f.write_str("metric"),
            Self::Imperial => f.write_str("imperial"),
            Self::Unrecognized(value) => write!(f, "{}", value),
        }
    }
}

impl TryFrom<WireEnumRepr> for UnitSystem {
    type Error = String;

    fn try_from(repr: WireEnumRepr) -> core::result::Result<Self, Self::Error> {
        match repr {
            WireEnumRepr::Wire(value) => Ok(Self::from_wire(value)),
            WireEnumRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "metric" => Ok(Self::Metric),
                "imperial" => Ok(Self::Imperial),
                _ => Err(format!("unknown unit system: {}", name)),
            },
        }
    }
}

impl From<UnitSystem> for WireEnumRepr {
    fn from(units: UnitSystem) -> Self {
        match units {
            UnitSystem::Metric => WireEnumRepr::Name("metric".to_string()),
            UnitSystem::Imperial => WireEnumRepr::Name("imperial".to_string()),
            UnitSystem::Unrecognized(value) => WireEnumRepr::Wire(value),
        }
    }
}

// ----------------------------------------------------------------------------
// Ignore List
// ----------------------------------------------------------------------------

/// Nodes whose incoming messages the user chose to ignore
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList(Vec<NodeNum>);

impl IgnoreList {
    /// Maximum number of ignored nodes the device accepts
    pub const CAPACITY: usize = 3;

    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from a list, rejecting more than [`Self::CAPACITY`] distinct entries
    pub fn from_nums<I: IntoIterator<Item = NodeNum>>(nums: I) -> Result<Self> {
        let mut list = Self::new();
        for num in nums {
            list.add(num)?;
        }
        Ok(list)
    }

    pub fn contains(&self, num: NodeNum) -> bool {
        self.0.contains(&num)
    }

    /// Whether another node can be added
    pub fn can_add(&self) -> bool {
        self.0.len() < Self::CAPACITY
    }

    /// Add a node; adding an already ignored node is a no-op
    pub fn add(&mut self, num: NodeNum) -> Result<()> {
        if self.contains(num) {
            return Ok(());
        }
        if !self.can_add() {
            return Err(MeshError::IgnoreListFull {
                capacity: Self::CAPACITY,
            });
        }
        self.0.push(num);
        Ok(())
    }

    /// Remove a node, returning whether it was present
    pub fn remove(&mut self, num: NodeNum) -> bool {
        let before = self.0.len();
        self.0.retain(|n| *n != num);
        self.0.len() != before
    }

    /// Flip the ignored state of a node, returning the new state
    pub fn toggle(&mut self, num: NodeNum) -> Result<bool> {
        if self.remove(num) {
            Ok(false)
        } else {
            self.add(num)?;
            Ok(true)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeNum> {
        self.0.iter()
    }
}

// ----------------------------------------------------------------------------
// Display Configuration
// ----------------------------------------------------------------------------

/// Presentation settings read from the device configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// How coordinates are rendered
    pub coordinate_format: CoordinateFormat,
    /// Unit system for distances
    pub units: UnitSystem,
    /// Render environment temperatures in Fahrenheit
    pub environment_display_fahrenheit: bool,
    /// Nodes marked as ignored in the node list
    pub ignore_incoming: IgnoreList,
}

impl DisplayConfig {
    /// Load from a TOML document; missing keys take their defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: DisplayConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.ignore_incoming.len() > IgnoreList::CAPACITY {
            return Err(MeshError::config_error(format!(
                "ignore_incoming holds {} nodes, at most {} allowed",
                self.ignore_incoming.len(),
                IgnoreList::CAPACITY
            )));
        }
        Ok(())
    }

    /// Configuration with imperial units and Fahrenheit temperatures
    pub fn imperial() -> Self {
        Self {
            units: UnitSystem::Imperial,
            environment_display_fahrenheit: true,
            ..Self::default()
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.coordinate_format, CoordinateFormat::Dec);
        assert_eq!(config.units, UnitSystem::Metric);
        assert!(!config.environment_display_fahrenheit);
        assert!(config.ignore_incoming.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let config = DisplayConfig::from_toml_str(
            r#"
            coordinate_format = "mgrs"
            units = "imperial"
            environment_display_fahrenheit = true
            ignore_incoming = [7, 9]
            "#,
        )
        .unwrap();
        assert_eq!(config.coordinate_format, CoordinateFormat::Mgrs);
        assert_eq!(config.units, UnitSystem::Imperial);
        assert!(config.environment_display_fahrenheit);
        assert!(config.ignore_incoming.contains(NodeNum::new(9)));
    }

    #[test]
    fn test_from_toml_numeric_values() {
        let config = DisplayConfig::from_toml_str("coordinate_format = 5\nunits = 7\n").unwrap();
        assert_eq!(config.coordinate_format, CoordinateFormat::Other(5));
        assert_eq!(config.units, UnitSystem::Unrecognized(7));
    }

    #[test]
    fn test_from_toml_rejects_oversized_ignore_list() {
        let result = DisplayConfig::from_toml_str("ignore_incoming = [1, 2, 3, 4]\n");
        assert!(matches!(result, Err(MeshError::Configuration { .. })));
    }

    #[test]
    fn test_from_toml_rejects_unknown_names() {
        assert!(matches!(
            DisplayConfig::from_toml_str("units = \"furlongs\"\n"),
            Err(MeshError::Toml(_))
        ));
    }

    #[test]
    fn test_ignore_list_capacity() {
        let mut list = IgnoreList::from_nums([1, 2, 3].map(NodeNum::new)).unwrap();
        assert!(!list.can_add());
        assert!(matches!(
            list.add(NodeNum::new(4)),
            Err(MeshError::IgnoreListFull { capacity: 3 })
        ));
        // Re-adding an existing entry is fine even when full
        assert!(list.add(NodeNum::new(2)).is_ok());
        assert_eq!(list.toggle(NodeNum::new(2)).unwrap(), false);
        assert_eq!(list.toggle(NodeNum::new(4)).unwrap(), true);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_unit_system_wire_values() {
        assert_eq!(UnitSystem::from_wire(0), UnitSystem::Metric);
        assert_eq!(UnitSystem::from_wire(1), UnitSystem::Imperial);
        assert_eq!(UnitSystem::from_wire(2), UnitSystem::Unrecognized(2));
        assert_eq!(UnitSystem::Unrecognized(2).to_wire(), 2);
    }
}
