//! Core types for the mesh node registry
//!
//! Newtypes for node numbers and second-resolution timestamps, and the clock
//! abstraction that every time-sensitive query receives its reading from.

use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::MeshError;

// ----------------------------------------------------------------------------
// Node Number
// ----------------------------------------------------------------------------

/// Stable 32-bit node number, the primary identity of a mesh participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeNum(u32);

impl NodeNum {
    /// Create a node number
    pub const fn new(num: u32) -> Self {
        Self(num)
    }

    /// Reinterpret a wire `int32` node number
    pub const fn from_wire(num: i32) -> Self {
        Self(num as u32)
    }

    /// Get the raw value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The value as carried by the wire format
    pub const fn to_wire(&self) -> i32 {
        self.0 as i32
    }
}

impl From<u32> for NodeNum {
    fn from(num: u32) -> Self {
        Self(num)
    }
}

impl From<NodeNum> for u32 {
    fn from(num: NodeNum) -> Self {
        num.0
    }
}

impl fmt::Display for NodeNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{:08x}", self.0)
    }
}

impl FromStr for NodeNum {
    type Err = MeshError;

    /// Accepts `!0000002a`, `0x2a` or plain decimal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('!') {
            u32::from_str_radix(hex, 16)
        } else if let Some(hex) = trimmed.strip_prefix("0x") {
            u32::from_str_radix(hex, 16)
        } else {
            trimmed.parse::<u32>()
        };

        parsed
            .map(Self)
            .map_err(|_| MeshError::invalid_node_num(s))
    }
}

// ----------------------------------------------------------------------------
// Timestamp
// ----------------------------------------------------------------------------

/// Seconds since Unix epoch (NOT milliseconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// "Never heard" marker
    pub const NEVER: Self = Self(0);

    /// Create a timestamp from seconds
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Create a timestamp from a wire `int32` seconds value
    pub const fn from_wire(secs: i32) -> Self {
        Self(secs as i64)
    }

    /// Get the raw seconds
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// The value as carried by the wire format, saturating at the `int32` bounds
    pub fn to_wire(&self) -> i32 {
        self.0.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Whether this is the "never" marker
    pub fn is_never(&self) -> bool {
        self.0 == 0
    }

    /// Signed seconds elapsed from `earlier` to `self`
    pub fn seconds_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<i64> for Timestamp {
    type Output = Timestamp;

    fn add(self, secs: i64) -> Timestamp {
        Timestamp(self.0.saturating_add(secs))
    }
}

impl Sub for Timestamp {
    type Output = i64;

    fn sub(self, other: Timestamp) -> i64 {
        self.seconds_since(other)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// ----------------------------------------------------------------------------
// Time Source Trait
// ----------------------------------------------------------------------------

/// Provides the current time to callers that feed the registry
///
/// Nothing in this crate samples the clock on its own; consumers read a
/// `TimeSource` once and pass the `Timestamp` into the queries they make.
pub trait TimeSource {
    /// Get the current timestamp
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation of TimeSource
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_secs() as i64)
    }
}

/// Time source that always reports the same instant
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimeSource(Timestamp);

impl FixedTimeSource {
    pub fn new(now: Timestamp) -> Self {
        Self(now)
    }

    /// Move the fixed instant forward
    pub fn advance(&mut self, secs: i64) {
        self.0 = self.0 + secs;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
