//! Error types for the mesh node registry
//!
//! The registry's data paths never fail: missing or malformed telemetry degrades
//! to an absent value. Errors only originate at the parsing, configuration and
//! serialization seams collected here.

// ----------------------------------------------------------------------------
// Error Type
// ----------------------------------------------------------------------------

/// Core error type for the mesh node registry
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("Unknown hardware model: {name}")]
    UnknownHardwareModel { name: String },

    #[error("Invalid node number: {input}")]
    InvalidNodeNum { input: String },

    #[error("Ignore list is full (capacity: {capacity})")]
    IgnoreListFull { capacity: usize },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

// ----------------------------------------------------------------------------
// Convenience Error Constructors
// ----------------------------------------------------------------------------

impl MeshError {
    /// Create a configuration error with a reason
    pub fn config_error<T: Into<String>>(reason: T) -> Self {
        MeshError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create an unknown hardware model error
    pub fn unknown_hardware_model<T: Into<String>>(name: T) -> Self {
        MeshError::UnknownHardwareModel { name: name.into() }
    }

    /// Create an invalid node number error
    pub fn invalid_node_num<T: Into<String>>(input: T) -> Self {
        MeshError::InvalidNodeNum {
            input: input.into(),
        }
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, MeshError>;
pub type MeshResult<T> = Result<T>;
