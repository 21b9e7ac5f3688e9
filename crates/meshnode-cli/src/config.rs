//! CLI configuration file
//!
//! ```toml
//! [display]
//! coordinate_format = "mgrs"
//! units = "imperial"
//! environment_display_fahrenheit = true
//! ignore_incoming = [42]
//!
//! [replay]
//! skip_invalid_lines = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use meshnode_core::DisplayConfig;

use crate::error::Result;

/// Event replay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Skip lines that do not decode instead of failing the replay
    pub skip_invalid_lines: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            skip_invalid_lines: true,
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub replay: ReplayConfig,
}

impl AppConfig {
    /// Parse a TOML document; missing sections take their defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(input)?;
        config.display.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshnode_core::{CoordinateFormat, UnitSystem};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.replay.skip_invalid_lines);
    }

    #[test]
    fn test_sections() {
        let config = AppConfig::from_toml_str(
            "[display]\ncoordinate_format = \"dms\"\nunits = 1\n\n[replay]\nskip_invalid_lines = false\n",
        )
        .unwrap();
        assert_eq!(config.display.coordinate_format, CoordinateFormat::Dms);
        assert_eq!(config.display.units, UnitSystem::Imperial);
        assert!(!config.replay.skip_invalid_lines);
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(AppConfig::from_toml_str("[display\n").is_err());
    }
}
