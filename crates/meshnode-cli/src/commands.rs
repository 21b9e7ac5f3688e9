//! Command handlers for the meshnode CLI

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

use meshnode_core::{
    MeshEvent, NodeListEntry, NodeNum, NodeRecord, NodeRegistry, SystemTimeSource, TimeSource,
    Timestamp,
};

use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, ReplayConfig};
use crate::error::{CliError, Result};

/// Command dispatcher for handling CLI commands
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Execute a CLI command, writing its output to `out`
    pub fn execute<W: Write>(cli: Cli, config: &AppConfig, out: &mut W) -> Result<()> {
        match cli.command {
            Commands::Replay {
                file,
                own,
                now,
                json,
            } => {
                let own = own.map(|s| s.parse::<NodeNum>()).transpose()?;
                let now = resolve_now(now);
                let registry = replay_file(&file, &config.replay, now)?;
                Self::handle_replay_command(&registry, own, config, now, json, out)
            }
            Commands::Show { file, num, now } => {
                let num = num.parse::<NodeNum>()?;
                let registry = replay_file(&file, &config.replay, resolve_now(now))?;
                Self::handle_show_command(&registry, num, out)
            }
            Commands::Export { file, now } => {
                let registry = replay_file(&file, &config.replay, resolve_now(now))?;
                Self::handle_export_command(&registry, out)
            }
        }
    }

    /// Print the node list, local node first
    pub fn handle_replay_command<W: Write>(
        registry: &NodeRegistry,
        own: Option<NodeNum>,
        config: &AppConfig,
        now: Timestamp,
        json: bool,
        out: &mut W,
    ) -> Result<()> {
        let local = own.and_then(|num| registry.get(num));
        if own.is_some() && local.is_none() {
            warn!("Local node is not in the replayed events");
        }

        let entries = node_list(registry, own, local.as_deref(), config, now);
        if json {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        } else {
            for entry in &entries {
                writeln!(out, "{}", format_row(entry))?;
            }
        }

        let stats = registry.stats(now);
        info!(
            "{} nodes, {} online, {} with position",
            stats.total_nodes, stats.online_nodes, stats.with_valid_position
        );
        Ok(())
    }

    /// Print one record as JSON
    pub fn handle_show_command<W: Write>(
        registry: &NodeRegistry,
        num: NodeNum,
        out: &mut W,
    ) -> Result<()> {
        let node = registry.get(num).ok_or(CliError::NodeNotFound(num))?;
        serde_json::to_writer_pretty(&mut *out, &*node)?;
        writeln!(out)?;
        Ok(())
    }

    /// Print all records in the persisted row layout
    pub fn handle_export_command<W: Write>(registry: &NodeRegistry, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, &registry.export_rows())?;
        writeln!(out)?;
        Ok(())
    }
}

fn resolve_now(now: Option<i64>) -> Timestamp {
    match now {
        Some(secs) => Timestamp::from_secs(secs),
        None => SystemTimeSource::new().now(),
    }
}

// ----------------------------------------------------------------------------
// Event Replay
// ----------------------------------------------------------------------------

fn replay_file(path: &str, config: &ReplayConfig, now: Timestamp) -> Result<NodeRegistry> {
    info!("Replaying events from: {}", path);
    let reader = BufReader::new(File::open(path)?);
    replay_events(reader, config, now)
}

/// Apply every event in a JSON-lines stream to a fresh registry
///
/// Blank lines and lines starting with `#` are ignored.
pub fn replay_events<R: BufRead>(
    reader: R,
    config: &ReplayConfig,
    now: Timestamp,
) -> Result<NodeRegistry> {
    let mut registry = NodeRegistry::new();
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<MeshEvent>(trimmed) {
            Ok(event) => {
                registry.apply(&event, now);
                applied += 1;
            }
            Err(e) => {
                let err = invalid_event(index + 1, &e);
                if !config.skip_invalid_lines {
                    return Err(err);
                }
                warn!("Skipping {}", err);
                skipped += 1;
            }
        }
    }

    debug!("Applied {} events, skipped {}", applied, skipped);
    Ok(registry)
}

/// Parse failure reported by position only; serde messages can quote input values
fn invalid_event(line: usize, err: &serde_json::Error) -> CliError {
    CliError::InvalidEvent {
        line,
        column: err.column(),
        category: format!("{:?}", err.classify()).to_lowercase(),
    }
}

// ----------------------------------------------------------------------------
// Node List
// ----------------------------------------------------------------------------

/// Node list rows in display order
pub fn node_list(
    registry: &NodeRegistry,
    own: Option<NodeNum>,
    local: Option<&NodeRecord>,
    config: &AppConfig,
    now: Timestamp,
) -> Vec<NodeListEntry> {
    let ordered: Vec<Arc<NodeRecord>> = registry.display_order(own);
    ordered
        .iter()
        .map(|node| NodeListEntry::build(node, local, &config.display, now))
        .collect()
}

/// One table line for a node list row
pub fn format_row(entry: &NodeListEntry) -> String {
    let marker = match (entry.is_local, entry.ignored) {
        (true, _) => '*',
        (false, true) => 'x',
        (false, false) => ' ',
    };

    let mut line = format!(
        "{}{:<4} {} {:<24} {:>9} {:>12} {:>7}",
        marker,
        entry.short_name,
        entry.num,
        entry.long_name,
        entry.distance.as_deref().unwrap_or("-"),
        entry.battery,
        entry.last_heard,
    );
    if let Some(coordinates) = &entry.coordinates {
        line.push_str("  ");
        line.push_str(coordinates);
    }
    if let Some(signal) = &entry.signal {
        line.push_str("  ");
        line.push_str(signal);
    }
    if let Some(environment) = &entry.environment {
        line.push_str("  ");
        line.push_str(environment.trim_end());
    }
    line
}
