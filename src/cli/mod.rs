//! Command-line interface.
//!
//! Unified CLI for confgate operations.

pub mod commands;

use clap::{Parser, Subcommand};

/// Confgate - parent-gated configuration access layer.
#[derive(Parser, Debug)]
#[command(name = "confgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file path.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Settings operations.
    Config(commands::ConfigArgs),
    /// Relation source operations.
    Relation(commands::RelationArgs),
    /// Key inspection: validate and encode/decode logical keys.
    Key(commands::KeyArgs),
}
