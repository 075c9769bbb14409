//! Key command implementation.

use crate::core::key::Key;
use crate::drivers::{flat, tree, DriverKind};
use anyhow::Result;
use clap::{Args, Subcommand};

/// Key inspection operations.
#[derive(Args, Debug)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub command: KeyCommand,
}

/// Key subcommands.
#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Validate a logical key and show its derived parts.
    Check {
        /// Logical key.
        key: String,
    },
    /// Encode a logical key for a driver.
    Encode {
        /// Logical key.
        key: String,
        /// Driver kind (flat, tree, hybrid).
        #[arg(long, default_value = "tree")]
        driver: String,
        /// Flat-store physical prefix.
        #[arg(long, default_value = "config")]
        prefix: String,
        /// Tree-store base path.
        #[arg(long, default_value = "/config")]
        base_path: String,
    },
    /// Decode a physical key or path back to logical form.
    Decode {
        /// Encoded key or path.
        encoded: String,
        /// Driver kind (flat, tree, hybrid).
        #[arg(long, default_value = "tree")]
        driver: String,
        /// Flat-store physical prefix.
        #[arg(long, default_value = "config")]
        prefix: String,
        /// Tree-store base path.
        #[arg(long, default_value = "/config")]
        base_path: String,
    },
}

/// Run the key command.
pub fn run_key(args: KeyArgs) -> Result<()> {
    match args.command {
        KeyCommand::Check { key } => check_key(&key),
        KeyCommand::Encode {
            key,
            driver,
            prefix,
            base_path,
        } => {
            let key = Key::parse(&key)?;
            let encoded = match DriverKind::from_name(&driver)? {
                DriverKind::Flat => format!("{}{}", prefix, flat::camel_encode(key.as_str())),
                // Hybrid uses tree addressing.
                DriverKind::Tree | DriverKind::Hybrid => {
                    tree::path_encode(&base_path, key.as_str())
                }
            };
            println!("{encoded}");
            Ok(())
        }
        KeyCommand::Decode {
            encoded,
            driver,
            prefix,
            base_path,
        } => {
            let decoded = match DriverKind::from_name(&driver)? {
                DriverKind::Flat => {
                    let stripped = encoded.strip_prefix(&prefix).unwrap_or(&encoded);
                    flat::camel_decode(stripped)
                }
                DriverKind::Tree | DriverKind::Hybrid => tree::path_decode(&base_path, &encoded),
            };
            println!("{decoded}");
            Ok(())
        }
    }
}

fn check_key(raw: &str) -> Result<()> {
    let key = Key::parse(raw)?;
    println!("✓ Key is well-formed");
    println!("  suffix: {}", key.suffix());
    match key.parent() {
        Some(parent) => println!("  parent: {parent}"),
        None => println!("  parent: none (non-numeric leading segment; gating skipped)"),
    }
    Ok(())
}
