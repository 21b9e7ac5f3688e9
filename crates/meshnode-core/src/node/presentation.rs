//! Node list rows
//!
//! Bundles the derived facts of one record into the strings a node list shows.

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::node::record::{NodeRecord, Rgb};
use crate::types::{NodeNum, Timestamp};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Coarse "time since" label for a last-heard timestamp
pub fn format_ago(last_heard: Timestamp, now: Timestamp) -> String {
    if last_heard.is_never() {
        return "?".to_string();
    }

    let elapsed = now - last_heard;
    if elapsed < MINUTE {
        "now".to_string()
    } else if elapsed < HOUR {
        format!("{} min", elapsed / MINUTE)
    } else if elapsed < 48 * HOUR {
        format!("{} h", elapsed / HOUR)
    } else if elapsed < 1000 * DAY {
        format!("{} d", elapsed / DAY)
    } else {
        "?".to_string()
    }
}

/// Everything one row of the node list displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeListEntry {
    pub num: NodeNum,
    pub short_name: String,
    pub long_name: String,
    pub foreground: String,
    pub background: String,
    /// Node is on the ignore list; still listed, only marked
    pub ignored: bool,
    pub is_local: bool,
    pub online: bool,
    /// Coordinates in the configured format, valid positions only
    pub coordinates: Option<String>,
    pub geo_uri: Option<String>,
    /// Distance from the local node
    pub distance: Option<String>,
    pub bearing: Option<i32>,
    pub battery: String,
    pub last_heard: String,
    pub environment: Option<String>,
    pub signal: Option<String>,
}

impl NodeListEntry {
    /// Build the row for `node` as seen from `local`
    pub fn build(
        node: &NodeRecord,
        local: Option<&NodeRecord>,
        config: &DisplayConfig,
        now: Timestamp,
    ) -> Self {
        let is_local = local.map_or(false, |l| l.num() == node.num());
        let (foreground, background): (Rgb, Rgb) = node.color_pair();
        let long_name = node.display_long_name().to_string();

        let position = node.valid_position();
        let environment = node.environment_summary(config.environment_display_fahrenheit);

        Self {
            num: node.num(),
            short_name: node.display_short_name().to_string(),
            foreground: foreground.to_string(),
            background: background.to_string(),
            ignored: config.ignore_incoming.contains(node.num()),
            is_local,
            online: node.is_online(now),
            coordinates: position.map(|p| p.gps_string(config.coordinate_format)),
            geo_uri: position.map(|p| p.geo_uri(&long_name)),
            distance: local.and_then(|l| l.formatted_distance(node, config.units)),
            bearing: local.and_then(|l| l.bearing_to(node)),
            battery: node.battery_status().to_string(),
            last_heard: format_ago(node.last_heard(), now),
            environment: (!environment.is_empty()).then_some(environment),
            signal: node.signal_summary(is_local),
            long_name,
        }
    }
}
