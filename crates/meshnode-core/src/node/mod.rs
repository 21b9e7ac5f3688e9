//! Node Records
//!
//! The per-node record the registry stores, the queries that derive
//! presentation facts from it, and the node list row built from those facts.

pub mod presentation;
pub mod record;

pub use presentation::{format_ago, NodeListEntry};
pub use record::{BatteryStatus, NodeRecord, Rgb, ONLINE_WINDOW_SECS};
