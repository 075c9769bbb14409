//! Confgate - unified CLI entrypoint.
//!
//! Usage:
//!   confgate config validate --config config/confgate.toml
//!   confgate config show --config config/confgate.toml [--format json]
//!   confgate config generate --driver hybrid
//!   confgate relation validate --path config/relation.json
//!   confgate key check 7_feature_x
//!   confgate key encode 7_feature_x --driver tree --base-path /config

use anyhow::Result;
use clap::Parser;
use confgate::cli::commands::{run_config, run_key, run_relation};
use confgate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Config(args) => run_config(args),
        Commands::Relation(args) => run_relation(args),
        Commands::Key(args) => run_key(args),
    }
}

fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
