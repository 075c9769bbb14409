//! In-memory store implementations.
//!
//! Used by the test suites and by embedders that want the confgate contract
//! without a network backend. Semantics mirror the real stores: tree nodes
//! must be created explicitly under an existing parent, the root always
//! exists, and a node with children cannot be deleted.

use crate::core::config::FlatParams;
use crate::core::error::{ConfgateError, ConfgateResult};
use crate::store::connect::{FlatConnector, TreeConnector};
use crate::store::{Acl, FastAgent, FlatStore, TreeStore};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory flat KV store.
#[derive(Debug, Default)]
pub struct MemoryFlatStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryFlatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl FlatStore for MemoryFlatStore {
    fn exists(&self, key: &str) -> ConfgateResult<bool> {
        Ok(self.entries.read().contains_key(key))
    }

    fn get(&self, key: &str) -> ConfgateResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ConfgateResult<bool> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn delete(&self, key: &str) -> ConfgateResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> ConfgateResult<Vec<String>> {
        Ok(self
            .entries
            .read()
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

/// In-memory hierarchical tree store.
///
/// Nodes are kept as a sorted map from absolute path to value. The root
/// `/` exists implicitly and cannot be created or deleted.
#[derive(Debug, Default)]
pub struct MemoryTreeStore {
    nodes: RwLock<BTreeMap<String, String>>,
    creates: AtomicU64,
}

impl MemoryTreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total create calls accepted. Lets tests observe that intermediate
    /// nodes are not recreated by later writes.
    pub fn create_count(&self) -> u64 {
        self.creates.load(Ordering::Relaxed)
    }

    /// Number of stored nodes (excluding the implicit root).
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    fn parent_of(path: &str) -> &str {
        match path.rfind('/') {
            Some(0) => "/",
            Some(idx) => &path[..idx],
            None => "/",
        }
    }

    fn check_path(path: &str) -> ConfgateResult<()> {
        if !path.starts_with('/') || (path.len() > 1 && path.ends_with('/')) {
            return Err(ConfgateError::store(format!("malformed path: {path}")));
        }
        Ok(())
    }
}

impl TreeStore for MemoryTreeStore {
    fn exists(&self, path: &str) -> ConfgateResult<bool> {
        Self::check_path(path)?;
        Ok(path == "/" || self.nodes.read().contains_key(path))
    }

    fn get(&self, path: &str) -> ConfgateResult<Option<String>> {
        Self::check_path(path)?;
        Ok(self.nodes.read().get(path).cloned())
    }

    fn set(&self, path: &str, value: &str) -> ConfgateResult<bool> {
        Self::check_path(path)?;
        let mut nodes = self.nodes.write();
        match nodes.get_mut(path) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(true)
            }
            None => Err(ConfgateError::store(format!("no node at {path}"))),
        }
    }

    fn delete(&self, path: &str) -> ConfgateResult<bool> {
        Self::check_path(path)?;
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(path) {
            return Ok(false);
        }
        let child_prefix = format!("{path}/");
        if nodes.range(child_prefix.clone()..).next().map_or(false, |(k, _)| {
            k.starts_with(&child_prefix)
        }) {
            return Err(ConfgateError::store(format!("node {path} has children")));
        }
        Ok(nodes.remove(path).is_some())
    }

    fn create(&self, path: &str, value: &str, _acl: &Acl) -> ConfgateResult<String> {
        Self::check_path(path)?;
        if path == "/" {
            return Err(ConfgateError::store("cannot create the root"));
        }
        let mut nodes = self.nodes.write();
        if nodes.contains_key(path) {
            return Err(ConfgateError::store(format!("node {path} already exists")));
        }
        let parent = Self::parent_of(path);
        if parent != "/" && !nodes.contains_key(parent) {
            return Err(ConfgateError::store(format!(
                "parent {parent} of {path} does not exist"
            )));
        }
        nodes.insert(path.to_string(), value.to_string());
        self.creates.fetch_add(1, Ordering::Relaxed);
        Ok(path.to_string())
    }

    fn list_children(&self, path: &str) -> ConfgateResult<Vec<String>> {
        Self::check_path(path)?;
        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };
        let nodes = self.nodes.read();
        let mut children = Vec::new();
        for key in nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, _)| k)
        {
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                children.push(rest.to_string());
            }
        }
        Ok(children)
    }
}

/// In-memory fast agent over a local snapshot map.
#[derive(Default)]
pub struct MemoryFastAgent {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryFastAgent {
    /// Create an empty agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a path into the agent's snapshot.
    pub fn publish(&self, path: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(path.into(), value.into());
    }

    /// Drop a path from the agent's snapshot.
    pub fn retract(&self, path: &str) {
        self.entries.write().remove(path);
    }
}

impl FastAgent for MemoryFastAgent {
    fn lookup(&self, path: &str) -> Option<String> {
        self.entries.read().get(path).cloned()
    }
}

/// Connector returning a shared in-memory flat store for any parameters.
pub struct MemoryFlatConnector {
    store: Arc<MemoryFlatStore>,
}

impl MemoryFlatConnector {
    /// Wrap a shared store.
    pub fn new(store: Arc<MemoryFlatStore>) -> Self {
        Self { store }
    }
}

impl FlatConnector for MemoryFlatConnector {
    fn connect(
        &self,
        _params: &FlatParams,
        _timeout: Duration,
    ) -> ConfgateResult<Arc<dyn FlatStore>> {
        Ok(self.store.clone())
    }
}

/// Connector returning a shared in-memory tree store for any host.
pub struct MemoryTreeConnector {
    store: Arc<MemoryTreeStore>,
}

impl MemoryTreeConnector {
    /// Wrap a shared store.
    pub fn new(store: Arc<MemoryTreeStore>) -> Self {
        Self { store }
    }
}

impl TreeConnector for MemoryTreeConnector {
    fn connect(&self, _host: &str, _timeout: Duration) -> ConfgateResult<Arc<dyn TreeStore>> {
        Ok(self.store.clone())
    }
}
