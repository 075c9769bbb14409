//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

#![allow(dead_code)]

use confgate::drivers::{FlatDriver, HybridDriver, TreeDriver};
use confgate::relation::RelationMap;
use confgate::store::memory::{MemoryFastAgent, MemoryFlatStore, MemoryTreeStore};
use confgate::store::Acl;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Base path used by tree-driver tests.
pub const BASE_PATH: &str = "/config";

/// Flat-store prefix used by flat-driver tests.
pub const FLAT_PREFIX: &str = "config";

/// Build a tree driver over a fresh in-memory store.
pub fn tree_driver(relation: RelationMap) -> (Arc<MemoryTreeStore>, TreeDriver) {
    let store = Arc::new(MemoryTreeStore::new());
    let driver = TreeDriver::new(
        store.clone(),
        BASE_PATH.to_string(),
        Acl::any_ipv4(),
        Arc::new(relation),
    );
    (store, driver)
}

/// Build a tree driver over an existing store (a "restarted" instance with
/// a cold parent memo).
pub fn tree_driver_over(store: Arc<MemoryTreeStore>, relation: RelationMap) -> TreeDriver {
    TreeDriver::new(
        store,
        BASE_PATH.to_string(),
        Acl::any_ipv4(),
        Arc::new(relation),
    )
}

/// Build a flat driver over a fresh in-memory store.
pub fn flat_driver(relation: RelationMap) -> (Arc<MemoryFlatStore>, FlatDriver) {
    let store = Arc::new(MemoryFlatStore::new());
    let driver = FlatDriver::new(store.clone(), FLAT_PREFIX.to_string(), Arc::new(relation));
    (store, driver)
}

/// Build a hybrid driver over fresh in-memory stores.
pub fn hybrid_driver(
    relation: RelationMap,
) -> (Arc<MemoryFastAgent>, Arc<MemoryTreeStore>, HybridDriver) {
    let agent = Arc::new(MemoryFastAgent::new());
    let store = Arc::new(MemoryTreeStore::new());
    let relation = Arc::new(relation);
    let tree = TreeDriver::new(
        store.clone(),
        BASE_PATH.to_string(),
        Acl::any_ipv4(),
        relation.clone(),
    );
    let driver = HybridDriver::new(agent.clone(), tree, relation);
    (agent, store, driver)
}

/// Relation mapping with a single entry.
pub fn relation_with(suffix: &str, values: &[&str]) -> RelationMap {
    RelationMap::from_entries([(suffix.to_string(), values.iter().map(|v| v.to_string()))])
}

/// Create a minimal valid settings file for the tree driver.
pub fn create_tree_settings() -> NamedTempFile {
    write_settings(
        r#"
driver = "tree"

[tree]
address = "127.0.0.1:2181"
base_path = "/config"
"#,
    )
}

/// Create a minimal valid settings file for the flat driver.
pub fn create_flat_settings() -> NamedTempFile {
    write_settings(
        r#"
driver = "flat"

[flat]
host = "127.0.0.1"
port = 6379
"#,
    )
}

/// Write arbitrary settings content to a temp file.
pub fn write_settings(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write settings");
    file
}

/// Write a relation mapping JSON to a temp file with a .json suffix.
pub fn write_relation(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write relation");
    file
}
