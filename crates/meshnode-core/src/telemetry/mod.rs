//! Telemetry value objects
//!
//! Immutable values built from decoded wire records: identity, position,
//! device metrics, environment metrics and link quality. A node record holds at
//! most one of each and replaces it wholesale on every update.

pub mod link;
pub mod metrics;
pub mod position;
pub mod user;

pub use link::LinkQuality;
pub use metrics::{DeviceMetrics, EnvironmentMetrics};
pub use position::{deg_d, deg_i, Position};
pub use user::{pretty_hw_model_name, HardwareModel, MeshUser};
