//! Configuration facade.
//!
//! The facade owns the single driver instance selected for the process,
//! validates raw keys before they reach any backend, and forwards the
//! shared contract. Construction is explicit: settings are validated, the
//! relation mapping is loaded once, and the driver's store connection is
//! established through injected connectors.

use crate::core::config::Settings;
use crate::core::error::{ConfgateError, ConfgateResult};
use crate::core::key::Key;
use crate::drivers::{build_driver, ConfigDriver, Connectors, DriverKind};
use crate::relation::RelationMap;
use std::sync::Arc;

/// Entry point for configuration access.
pub struct ConfigFacade {
    driver: Box<dyn ConfigDriver>,
}

impl std::fmt::Debug for ConfigFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFacade").finish_non_exhaustive()
    }
}

impl ConfigFacade {
    /// Build a facade from settings, loading the relation source and
    /// connecting the selected driver.
    pub fn new(settings: &Settings, connectors: &Connectors) -> ConfgateResult<Self> {
        settings
            .validate()
            .map_err(|e| ConfgateError::config(e.to_string()))?;
        let relation = Arc::new(RelationMap::load(&settings.relation)?);
        let driver = build_driver(settings, relation, connectors)?;
        Ok(Self { driver })
    }

    /// Build a facade from settings with an explicit relation mapping,
    /// bypassing the file-based relation source.
    pub fn with_relation(
        settings: &Settings,
        relation: RelationMap,
        connectors: &Connectors,
    ) -> ConfgateResult<Self> {
        settings
            .validate()
            .map_err(|e| ConfgateError::config(e.to_string()))?;
        let driver = build_driver(settings, Arc::new(relation), connectors)?;
        Ok(Self { driver })
    }

    /// Wrap an already constructed driver.
    pub fn with_driver(driver: Box<dyn ConfigDriver>) -> Self {
        Self { driver }
    }

    /// The selected driver kind.
    pub fn kind(&self) -> DriverKind {
        self.driver.kind()
    }

    /// Read a configuration value. `ignore_block` bypasses parent gating.
    ///
    /// `None` means the key has no value or is hidden by its gate; it is
    /// never a failure signal.
    pub fn get(&self, key: &str, ignore_block: bool) -> ConfgateResult<Option<String>> {
        let key = Key::parse(key)?;
        self.driver.get(&key, ignore_block)
    }

    /// Write a configuration value.
    pub fn set(&self, key: &str, value: &str) -> ConfgateResult<bool> {
        let key = Key::parse(key)?;
        self.driver.set(&key, value)
    }

    /// Delete a configuration value. False when the key was absent.
    pub fn delete(&self, key: &str) -> ConfgateResult<bool> {
        let key = Key::parse(key)?;
        self.driver.delete(&key)
    }

    /// Enumerate descendant keys in logical form.
    pub fn children(&self, key: &str) -> ConfgateResult<Vec<String>> {
        let key = Key::parse(key)?;
        self.driver.children(&key)
    }
}
