//! Primitive store clients.
//!
//! Backing stores are external collaborators reached through narrow
//! synchronous traits: a flat cache-style store addressed by plain keys,
//! a hierarchical tree store addressed by slash paths, and a read-only
//! fast agent consulted by the hybrid driver. Real network clients live
//! outside this crate; [`memory`] provides in-process implementations for
//! tests and embedding.
//!
//! Each driver holds exactly one store handle for its process lifetime,
//! injected at construction and reused for every call.

pub mod connect;
pub mod memory;

use crate::core::error::ConfgateResult;

/// All permissions, for nodes created by this layer.
pub const PERM_ALL: u32 = 0x1f;

/// Access-control entry attached to tree nodes created by this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acl {
    /// ACL scheme, e.g. "ip".
    pub scheme: String,
    /// Scheme-specific identity, e.g. an IPv4 address or CIDR range.
    pub id: String,
    /// Permission bits.
    pub perms: u32,
}

impl Acl {
    /// Open to any IPv4 address. The default for created nodes.
    pub fn any_ipv4() -> Self {
        Self {
            scheme: "ip".to_string(),
            id: "0.0.0.0/0".to_string(),
            perms: PERM_ALL,
        }
    }

    /// Restricted to a single IP or CIDR range.
    pub fn for_ip(ip: impl Into<String>) -> Self {
        Self {
            scheme: "ip".to_string(),
            id: ip.into(),
            perms: PERM_ALL,
        }
    }
}

impl Default for Acl {
    fn default() -> Self {
        Self::any_ipv4()
    }
}

/// Flat cache-style store primitive contract.
///
/// Keys are opaque flat strings; hierarchy is emulated by the driver
/// through prefix scans.
pub trait FlatStore: Send + Sync + std::fmt::Debug {
    /// Whether the key exists.
    fn exists(&self, key: &str) -> ConfgateResult<bool>;

    /// Read a key's value.
    fn get(&self, key: &str) -> ConfgateResult<Option<String>>;

    /// Write a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> ConfgateResult<bool>;

    /// Delete a key. False when the key was absent.
    fn delete(&self, key: &str) -> ConfgateResult<bool>;

    /// All keys starting with the given prefix. Order follows the backend.
    fn keys_with_prefix(&self, prefix: &str) -> ConfgateResult<Vec<String>>;
}

/// Hierarchical tree store primitive contract.
///
/// Paths are absolute slash-delimited strings. Creation is explicit and
/// per-node; intermediate nodes never appear implicitly.
pub trait TreeStore: Send + Sync + std::fmt::Debug {
    /// Whether the path exists.
    fn exists(&self, path: &str) -> ConfgateResult<bool>;

    /// Read a node's value.
    fn get(&self, path: &str) -> ConfgateResult<Option<String>>;

    /// Overwrite an existing node's value. Fails if the node is missing.
    fn set(&self, path: &str, value: &str) -> ConfgateResult<bool>;

    /// Delete a node. False when the path was absent.
    fn delete(&self, path: &str) -> ConfgateResult<bool>;

    /// Create a node with the given value and ACL. Fails if the node
    /// already exists or its parent is missing. Returns the created path.
    fn create(&self, path: &str, value: &str, acl: &Acl) -> ConfgateResult<String>;

    /// Names of the path's immediate children.
    fn list_children(&self, path: &str) -> ConfgateResult<Vec<String>>;
}

/// Read-only local lookup consulted by the hybrid driver before the tree.
///
/// The agent is eventually consistent with the tree store; a `None` result
/// means "not locally known", not "absent from the tree".
pub trait FastAgent: Send + Sync {
    /// Look up a path in the agent's local snapshot.
    fn lookup(&self, path: &str) -> Option<String>;
}
