//! meshnode CLI library
//!
//! Replays files of decoded mesh events into a node registry and renders the
//! node list, single records, or persisted rows.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Commands};
pub use commands::CommandDispatcher;
pub use config::AppConfig;
pub use error::{CliError, Result};
