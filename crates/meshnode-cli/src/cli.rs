//! Command-line interface definitions and parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Display configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines event file and print the node list
    Replay {
        /// File with one decoded event per line
        file: String,
        /// Local node number (`!0000002a`, `0x2a` or decimal)
        #[arg(short, long)]
        own: Option<String>,
        /// Clock reading in seconds since epoch, defaults to the wall clock
        #[arg(short, long)]
        now: Option<i64>,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Replay an event file and print one node's record
    Show {
        /// File with one decoded event per line
        file: String,
        /// Node number to show
        num: String,
        /// Clock reading in seconds since epoch, defaults to the wall clock
        #[arg(short, long)]
        now: Option<i64>,
    },
    /// Replay an event file and print the persisted rows as JSON
    Export {
        /// File with one decoded event per line
        file: String,
        /// Clock reading in seconds since epoch, defaults to the wall clock
        #[arg(short, long)]
        now: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from(["meshnode", "-v", "replay", "events.jsonl", "--own", "!0000002a", "--now", "1000"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Replay { file, own, now, json } => {
                assert_eq!(file, "events.jsonl");
                assert_eq!(own.as_deref(), Some("!0000002a"));
                assert_eq!(now, Some(1000));
                assert!(!json);
            }
            _ => panic!("expected replay"),
        }
    }

    #[test]
    fn test_parse_show_with_config() {
        let cli = Cli::parse_from(["meshnode", "show", "events.jsonl", "42", "--config", "display.toml"]);
        assert_eq!(cli.config.as_deref(), Some("display.toml"));
        assert!(matches!(cli.command, Commands::Show { .. }));
    }
}
