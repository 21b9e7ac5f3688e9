//! Mesh Node State Registry
//!
//! This crate turns a stream of decoded mesh-radio messages (identity, position,
//! device and environment telemetry, link quality) into one consistent record per
//! node, and derives presentation-ready facts from those records: distance and
//! bearing between nodes, staleness, and formatted telemetry strings.
//!
//! The crate performs no I/O. Every time-sensitive operation takes the clock
//! reading as an argument.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod anonymize;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod geo;
pub mod node;
pub mod persist;
pub mod registry;
pub mod telemetry;
pub mod types;
pub mod wire;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::{CoordinateFormat, DisplayConfig, IgnoreList, UnitSystem};
pub use errors::{MeshError, Result};
pub use node::{format_ago, BatteryStatus, NodeListEntry, NodeRecord, Rgb};
pub use persist::NodeRow;
pub use registry::{NodeChange, NodeRegistry, NodeSnapshot, NodeUpdate};
pub use telemetry::{
    DeviceMetrics, EnvironmentMetrics, HardwareModel, LinkQuality, MeshUser, Position,
};
pub use types::{FixedTimeSource, NodeNum, SystemTimeSource, TimeSource, Timestamp};
pub use wire::MeshEvent;
