//! Configuration parsing and validation.
//!
//! Confgate settings are loaded from TOML files with CLI overrides. One
//! driver is selected per process; each driver kind has its own parameter
//! section and the selected kind's section must be present and complete.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Driver names recognized by the settings validator.
pub const KNOWN_DRIVERS: [&str; 3] = ["flat", "tree", "hybrid"];

/// Top-level confgate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Selected driver: "flat", "tree", or "hybrid".
    pub driver: String,

    /// Flat-store connection parameters.
    #[serde(default)]
    pub flat: Option<FlatParams>,

    /// Tree-store connection parameters.
    #[serde(default)]
    pub tree: Option<TreeParams>,

    /// Hybrid-driver parameters (tree addressing; the fast agent is a
    /// locally injected capability, not configured here).
    #[serde(default)]
    pub hybrid: Option<TreeParams>,

    /// Relation source configuration.
    #[serde(default)]
    pub relation: RelationSource,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Flat-store connection parameters.
///
/// Host and port are required. Password and database may be omitted,
/// meaning "no auth" and "database 0" respectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatParams {
    /// Store host.
    pub host: String,

    /// Store port.
    pub port: u16,

    /// Auth password, if the store requires one.
    #[serde(default)]
    pub password: Option<String>,

    /// Database index to select after connecting.
    #[serde(default)]
    pub database: Option<u32>,

    /// Physical key prefix.
    #[serde(default = "default_flat_prefix")]
    pub prefix: String,
}

/// Tree-store connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    /// Comma-separated host list.
    pub address: String,

    /// Base path prepended to every encoded key.
    pub base_path: String,

    /// IP for node ACLs created by this layer. Defaults to open-to-any-IPv4.
    #[serde(default)]
    pub auth_ip: Option<String>,
}

/// Relation source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationSource {
    /// Path to the relation mapping file. Falls back to the default
    /// location when unset or missing on disk.
    #[serde(default)]
    pub path: Option<String>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions

fn default_flat_prefix() -> String {
    "config".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;
        let settings: Settings =
            toml::from_str(&content).with_context(|| "failed to parse settings file")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).with_context(|| "failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply CLI overrides to the settings.
    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(ref log_level) = overrides.log_level {
            self.telemetry.log_level = log_level.clone();
        }
        if let Some(ref relation_path) = overrides.relation_path {
            self.relation.path = Some(relation_path.clone());
        }
    }

    /// Validate settings consistency.
    pub fn validate(&self) -> Result<()> {
        self.validate_driver()?;
        self.validate_flat()?;
        self.validate_tree()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_driver(&self) -> Result<()> {
        if !KNOWN_DRIVERS.contains(&self.driver.as_str()) {
            anyhow::bail!(
                "driver must be one of {:?}, got: {}",
                KNOWN_DRIVERS,
                self.driver
            );
        }

        // The selected driver's parameter section must be present.
        match self.driver.as_str() {
            "flat" if self.flat.is_none() => {
                anyhow::bail!("[flat] section required for the flat driver")
            }
            "tree" if self.tree.is_none() => {
                anyhow::bail!("[tree] section required for the tree driver")
            }
            "hybrid" if self.hybrid.is_none() => {
                anyhow::bail!("[hybrid] section required for the hybrid driver")
            }
            _ => Ok(()),
        }
    }

    fn validate_flat(&self) -> Result<()> {
        if let Some(ref flat) = self.flat {
            if flat.host.is_empty() {
                anyhow::bail!("flat.host must not be empty");
            }
            if flat.port == 0 {
                anyhow::bail!("flat.port must be > 0");
            }
        }
        Ok(())
    }

    fn validate_tree(&self) -> Result<()> {
        for (section, params) in [("tree", &self.tree), ("hybrid", &self.hybrid)] {
            if let Some(params) = params {
                if params.address.split(',').all(|h| h.trim().is_empty()) {
                    anyhow::bail!("{section}.address must list at least one host");
                }
                if !params.base_path.starts_with('/') {
                    anyhow::bail!(
                        "{section}.base_path must be absolute, got: {}",
                        params.base_path
                    );
                }
            }
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "telemetry.log_level must be one of {:?}, got: {}",
                valid_levels,
                self.telemetry.log_level
            );
        }
        Ok(())
    }
}

/// CLI override options that can be applied to settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Override log level.
    pub log_level: Option<String>,
    /// Override relation file path.
    pub relation_path: Option<String>,
}
