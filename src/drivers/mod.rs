//! Configuration drivers.
//!
//! Drivers translate the shared get/set/delete/children contract onto one
//! backing store each:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ConfigFacade                          │
//! │              (key validation, dispatch)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────┬───────────────────────┬────────────────────┐
//! │   FlatDriver   │      TreeDriver       │    HybridDriver    │
//! │                │                       │                    │
//! │  camelCase     │  path codec,          │  fast agent read   │
//! │  codec, prefix │  make_path,           │  path over tree    │
//! │  scans         │  pre-order walk       │  authority         │
//! └────────────────┴───────────────────────┴────────────────────┘
//!                              │
//!               primitive store clients (store::*)
//! ```
//!
//! Every driver shares the parent-gating algorithm in [`gate`] and is
//! constructed exactly once per process through [`build_driver`], with its
//! store connection injected rather than looked up globally.

pub mod flat;
pub mod gate;
pub mod hybrid;
pub mod tree;

use crate::core::config::Settings;
use crate::core::error::{ConfgateError, ConfgateResult};
use crate::core::key::Key;
use crate::relation::RelationMap;
use crate::store::connect::{acquire_flat, acquire_tree, FlatConnector, TreeConnector};
use crate::store::{Acl, FastAgent};
use std::str::FromStr;
use std::sync::Arc;

pub use flat::FlatDriver;
pub use gate::ParentGate;
pub use hybrid::HybridDriver;
pub use tree::TreeDriver;

/// Shared driver contract, polymorphic over every backend.
pub trait ConfigDriver: Send + Sync {
    /// Which backend kind this driver serves.
    fn kind(&self) -> DriverKind;

    /// Read a key. `ignore_block` bypasses parent gating. `None` means
    /// "no value or hidden", never a failure.
    fn get(&self, key: &Key, ignore_block: bool) -> ConfgateResult<Option<String>>;

    /// Write a key, overwriting any previous value.
    fn set(&self, key: &Key, value: &str) -> ConfgateResult<bool>;

    /// Delete a key. False when it was absent.
    fn delete(&self, key: &Key) -> ConfgateResult<bool>;

    /// Enumerate descendant keys, decoded to logical form.
    fn children(&self, key: &Key) -> ConfgateResult<Vec<String>>;
}

/// Closed set of driver kinds, resolved once from validated settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Flat cache-style store.
    Flat,
    /// Hierarchical tree store.
    Tree,
    /// Fast agent over tree authority.
    Hybrid,
}

impl DriverKind {
    /// Resolve a configured driver name.
    pub fn from_name(name: &str) -> ConfgateResult<Self> {
        match name {
            "flat" => Ok(Self::Flat),
            "tree" => Ok(Self::Tree),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(ConfgateError::UnknownDriver {
                name: other.to_string(),
            }),
        }
    }

    /// The configured name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for DriverKind {
    type Err = ConfgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for DriverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Injected store-construction capabilities.
///
/// Only the capabilities the selected driver needs have to be present;
/// selecting a driver whose capability is missing fails at construction.
#[derive(Default)]
pub struct Connectors {
    /// Flat-store connection factory.
    pub flat: Option<Arc<dyn FlatConnector>>,
    /// Tree-store connection factory.
    pub tree: Option<Arc<dyn TreeConnector>>,
    /// Local fast agent for the hybrid driver.
    pub agent: Option<Arc<dyn FastAgent>>,
}

impl Connectors {
    /// No capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a flat-store connector.
    pub fn with_flat(mut self, connector: Arc<dyn FlatConnector>) -> Self {
        self.flat = Some(connector);
        self
    }

    /// Attach a tree-store connector.
    pub fn with_tree(mut self, connector: Arc<dyn TreeConnector>) -> Self {
        self.tree = Some(connector);
        self
    }

    /// Attach a fast agent.
    pub fn with_agent(mut self, agent: Arc<dyn FastAgent>) -> Self {
        self.agent = Some(agent);
        self
    }
}

/// Construct the process driver from validated settings.
///
/// Establishes the single store connection the driver will hold for its
/// lifetime, then wires the relation mapping into its gate.
pub fn build_driver(
    settings: &Settings,
    relation: Arc<RelationMap>,
    connectors: &Connectors,
) -> ConfgateResult<Box<dyn ConfigDriver>> {
    let kind = DriverKind::from_name(&settings.driver)?;
    tracing::info!(driver = %kind, relations = relation.len(), "building driver");

    match kind {
        DriverKind::Flat => {
            let params = settings
                .flat
                .as_ref()
                .ok_or_else(|| ConfgateError::params("missing [flat] parameters"))?;
            let connector = connectors.flat.as_deref().ok_or_else(|| {
                ConfgateError::MissingCapability {
                    message: "flat driver selected but no flat connector provided".to_string(),
                }
            })?;
            let store = acquire_flat(connector, params)?;
            Ok(Box::new(FlatDriver::new(
                store,
                params.prefix.clone(),
                relation,
            )))
        }
        DriverKind::Tree => {
            let params = settings
                .tree
                .as_ref()
                .ok_or_else(|| ConfgateError::params("missing [tree] parameters"))?;
            let connector = connectors.tree.as_deref().ok_or_else(|| {
                ConfgateError::MissingCapability {
                    message: "tree driver selected but no tree connector provided".to_string(),
                }
            })?;
            let store = acquire_tree(connector, &params.address)?;
            let acl = node_acl(params.auth_ip.as_deref());
            Ok(Box::new(TreeDriver::new(
                store,
                params.base_path.clone(),
                acl,
                relation,
            )))
        }
        DriverKind::Hybrid => {
            let params = settings
                .hybrid
                .as_ref()
                .ok_or_else(|| ConfgateError::params("missing [hybrid] parameters"))?;
            let connector = connectors.tree.as_deref().ok_or_else(|| {
                ConfgateError::MissingCapability {
                    message: "hybrid driver selected but no tree connector provided".to_string(),
                }
            })?;
            let agent = connectors.agent.clone().ok_or_else(|| {
                ConfgateError::MissingCapability {
                    message: "hybrid driver selected but no fast agent available".to_string(),
                }
            })?;
            let store = acquire_tree(connector, &params.address)?;
            let acl = node_acl(params.auth_ip.as_deref());
            let tree = TreeDriver::new(store, params.base_path.clone(), acl, relation.clone());
            Ok(Box::new(HybridDriver::new(agent, tree, relation)))
        }
    }
}

fn node_acl(auth_ip: Option<&str>) -> Acl {
    match auth_ip {
        Some(ip) => Acl::for_ip(ip),
        None => Acl::any_ipv4(),
    }
}
