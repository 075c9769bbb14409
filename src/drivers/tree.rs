//! Tree-store driver.
//!
//! Logical keys map onto tree paths by swapping the roles of `_` and `/`:
//! every underscore becomes a path separator and vice versa, the configured
//! base path is prepended, and one trailing separator is trimmed. Decoding
//! strips the base path and swaps back, so the codec is a true inverse.
//!
//! Writes materialize missing intermediate nodes one segment at a time,
//! skipping segments that already exist; the tree therefore never holds an
//! intermediate node this layer did not explicitly create.

use crate::core::error::{ConfgateError, ConfgateResult};
use crate::core::key::Key;
use crate::drivers::gate::ParentGate;
use crate::drivers::{ConfigDriver, DriverKind};
use crate::relation::RelationMap;
use crate::store::{Acl, TreeStore};
use std::sync::Arc;

/// Defensive bound on path depth; enumeration and writes beyond it fail.
pub const MAX_TREE_DEPTH: usize = 64;

/// Swap `_` and `/` in a key or path fragment.
fn swap_separators(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            '_' => '/',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Encode a logical key as an absolute tree path under a base path.
pub fn path_encode(base_path: &str, key: &str) -> String {
    let joined = format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        swap_separators(key)
    );
    joined.trim_end_matches('/').to_string()
}

/// Decode an absolute tree path back to logical key form.
pub fn path_decode(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let rest = path
        .strip_prefix(base)
        .unwrap_or(path)
        .trim_start_matches('/');
    swap_separators(rest)
}

/// Driver over a hierarchical tree store.
pub struct TreeDriver {
    store: Arc<dyn TreeStore>,
    base_path: String,
    acl: Acl,
    gate: ParentGate,
}

impl TreeDriver {
    /// Create a driver over an established store connection.
    pub fn new(
        store: Arc<dyn TreeStore>,
        base_path: String,
        acl: Acl,
        relation: Arc<RelationMap>,
    ) -> Self {
        Self {
            store,
            base_path,
            acl,
            gate: ParentGate::new(relation),
        }
    }

    /// Encode a logical key under this driver's base path.
    pub(crate) fn encode_key(&self, key: &str) -> String {
        path_encode(&self.base_path, key)
    }

    /// Existence-checked read at an encoded path. `None` when absent.
    pub(crate) fn read_at(&self, path: &str) -> ConfgateResult<Option<String>> {
        if self.store.exists(path)? {
            self.store.get(path)
        } else {
            Ok(None)
        }
    }

    /// Create every missing intermediate node of `path`, leaf excluded.
    fn make_path(&self, path: &str) -> ConfgateResult<()> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() > MAX_TREE_DEPTH {
            return Err(ConfgateError::DepthExceeded {
                depth: segments.len(),
                limit: MAX_TREE_DEPTH,
            });
        }
        let mut sub = String::with_capacity(path.len());
        for segment in &segments[..segments.len().saturating_sub(1)] {
            sub.push('/');
            sub.push_str(segment);
            if !self.store.exists(&sub)? {
                self.store.create(&sub, "", &self.acl)?;
            }
        }
        Ok(())
    }

    fn collect_descendants(
        &self,
        path: &str,
        depth: usize,
        out: &mut Vec<String>,
    ) -> ConfgateResult<()> {
        if depth > MAX_TREE_DEPTH {
            return Err(ConfgateError::DepthExceeded {
                depth,
                limit: MAX_TREE_DEPTH,
            });
        }
        for name in self.store.list_children(path)? {
            let child = format!("{path}/{name}");
            out.push(path_decode(&self.base_path, &child));
            self.collect_descendants(&child, depth + 1, out)?;
        }
        Ok(())
    }
}

impl ConfigDriver for TreeDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Tree
    }

    fn get(&self, key: &Key, ignore_block: bool) -> ConfgateResult<Option<String>> {
        if !ignore_block
            && !self
                .gate
                .visible(key, |pk| self.read_at(&self.encode_key(pk)))?
        {
            tracing::debug!(key = %key, "key hidden by parent gate");
            return Ok(None);
        }
        // Missing paths return None with no side effects, unlike the flat
        // driver's placeholder provisioning.
        self.read_at(&self.encode_key(key.as_str()))
    }

    fn set(&self, key: &Key, value: &str) -> ConfgateResult<bool> {
        let path = self.encode_key(key.as_str());
        if self.store.exists(&path)? {
            self.store.set(&path, value)
        } else {
            self.make_path(&path)?;
            let created = self.store.create(&path, value, &self.acl)?;
            Ok(created == path)
        }
    }

    fn delete(&self, key: &Key) -> ConfgateResult<bool> {
        let path = self.encode_key(key.as_str());
        if !self.store.exists(&path)? {
            return Ok(false);
        }
        if !self.store.list_children(&path)?.is_empty() {
            return Err(ConfgateError::DeleteNonLeaf { path });
        }
        self.store.delete(&path)
    }

    fn children(&self, key: &Key) -> ConfgateResult<Vec<String>> {
        let path = self.encode_key(key.as_str());
        if !self.store.exists(&path)? {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        self.collect_descendants(&path, 0, &mut out)?;
        Ok(out)
    }
}
