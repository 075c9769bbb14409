//! Config command implementation.

use crate::core::config::Settings;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Settings operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a settings file.
    Validate {
        /// Settings file path.
        #[arg(short, long, default_value = "config/confgate.toml")]
        config: PathBuf,
    },
    /// Print settings with defaults applied.
    Show {
        /// Settings file path.
        #[arg(short, long, default_value = "config/confgate.toml")]
        config: PathBuf,
        /// Output format (toml, json).
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Generate a settings template.
    Generate {
        /// Output file path; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Driver to template (flat, tree, hybrid).
        #[arg(long, default_value = "tree")]
        driver: String,
    },
}

/// Run the config command.
pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Validate { config } => validate_settings(&config),
        ConfigCommand::Show { config, format } => show_settings(&config, &format),
        ConfigCommand::Generate { output, driver } => generate_settings(output.as_deref(), &driver),
    }
}

fn validate_settings(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("settings file not found: {:?}", path);
    }
    let settings = Settings::from_file(path)?;
    println!("✓ Settings are valid (driver: {})", settings.driver);
    if settings.relation.path.is_none() {
        println!("  ⚠ relation.path not set; falling back to the default location");
    }
    Ok(())
}

fn show_settings(path: &PathBuf, format: &str) -> Result<()> {
    let settings = Settings::from_file(path)?;
    match format {
        "toml" => println!("{}", toml::to_string_pretty(&settings)?),
        "json" => println!("{}", serde_json::to_string_pretty(&settings)?),
        other => anyhow::bail!("unsupported format: {other} (expected toml or json)"),
    }
    Ok(())
}

fn generate_settings(output: Option<&std::path::Path>, driver: &str) -> Result<()> {
    let template = match driver {
        "flat" => FLAT_TEMPLATE,
        "tree" => TREE_TEMPLATE,
        "hybrid" => HYBRID_TEMPLATE,
        other => anyhow::bail!("unknown driver: {other}"),
    };
    match output {
        Some(path) => {
            std::fs::write(path, template)?;
            println!("✓ Template written to {}", path.display());
        }
        None => print!("{template}"),
    }
    Ok(())
}

const FLAT_TEMPLATE: &str = r#"driver = "flat"

[flat]
host = "127.0.0.1"
port = 6379
# password = "secret"
# database = 0
prefix = "config"

[relation]
# path = "config/relation.json"

[telemetry]
log_level = "info"
"#;

const TREE_TEMPLATE: &str = r#"driver = "tree"

[tree]
address = "127.0.0.1:2181,127.0.0.2:2181"
base_path = "/config"
# auth_ip = "10.0.0.0/8"

[relation]
# path = "config/relation.json"

[telemetry]
log_level = "info"
"#;

const HYBRID_TEMPLATE: &str = r#"driver = "hybrid"

[hybrid]
address = "127.0.0.1:2181,127.0.0.2:2181"
base_path = "/config"
# auth_ip = "10.0.0.0/8"

[relation]
# path = "config/relation.json"

[telemetry]
log_level = "info"
"#;
