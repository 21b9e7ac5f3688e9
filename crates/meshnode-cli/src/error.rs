//! Error handling for the meshnode CLI

use meshnode_core::NodeNum;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Registry error: {0}")]
    Core(#[from] meshnode_core::MeshError),

    #[error("Node {0} not found")]
    NodeNotFound(NodeNum),

    #[error("Invalid event on line {line}, column {column} ({category} error)")]
    InvalidEvent {
        line: usize,
        column: usize,
        category: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
