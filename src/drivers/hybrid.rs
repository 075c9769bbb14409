//! Hybrid driver.
//!
//! Reads go to a local fast agent first: a snapshot published near the
//! process, answering without a network round trip but only eventually
//! consistent with the tree store. On agent miss the tree store is the
//! authority. Mutations and enumeration always go through the tree driver
//! unchanged, because the agent path is read-only.
//!
//! A double miss (agent and tree) provisions an empty placeholder in the
//! tree and is recorded as a miss observation.

use crate::core::error::ConfgateResult;
use crate::core::key::Key;
use crate::drivers::gate::ParentGate;
use crate::drivers::tree::TreeDriver;
use crate::drivers::{ConfigDriver, DriverKind};
use crate::relation::RelationMap;
use crate::store::FastAgent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Driver layering a fast local read path over a tree-store authority.
pub struct HybridDriver {
    agent: Arc<dyn FastAgent>,
    tree: TreeDriver,
    gate: ParentGate,
    misses: AtomicU64,
}

impl HybridDriver {
    /// Compose an agent with an authoritative tree driver.
    pub fn new(
        agent: Arc<dyn FastAgent>,
        tree: TreeDriver,
        relation: Arc<RelationMap>,
    ) -> Self {
        Self {
            agent,
            tree,
            gate: ParentGate::new(relation),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of double misses observed since construction.
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Parent resolution for gating: agent first, tree on agent miss.
    fn read_parent(&self, parent_key: &str) -> ConfgateResult<Option<String>> {
        let path = self.tree.encode_key(parent_key);
        if let Some(value) = self.agent.lookup(&path) {
            return Ok(Some(value));
        }
        self.tree.read_at(&path)
    }
}

impl ConfigDriver for HybridDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Hybrid
    }

    fn get(&self, key: &Key, ignore_block: bool) -> ConfgateResult<Option<String>> {
        if !ignore_block && !self.gate.visible(key, |pk| self.read_parent(pk))? {
            tracing::debug!(key = %key, "key hidden by parent gate");
            return Ok(None);
        }

        let path = self.tree.encode_key(key.as_str());
        if let Some(value) = self.agent.lookup(&path) {
            // Agent hit: lower latency, weaker consistency. The tree is
            // bypassed entirely.
            return Ok(Some(value));
        }

        match self.tree.read_at(&path)? {
            Some(value) => Ok(Some(value)),
            None => {
                self.tree.set(key, "")?;
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(key = %key, "agent and tree store missed; placeholder created");
                Ok(None)
            }
        }
    }

    fn set(&self, key: &Key, value: &str) -> ConfgateResult<bool> {
        self.tree.set(key, value)
    }

    fn delete(&self, key: &Key) -> ConfgateResult<bool> {
        self.tree.delete(key)
    }

    fn children(&self, key: &Key) -> ConfgateResult<Vec<String>> {
        self.tree.children(key)
    }
}
