//! Confgate - parent-gated configuration access layer.
//!
//! Confgate presents a single get/set/delete/list-children contract over
//! interchangeable backing stores: a flat cache-style store, a hierarchical
//! path-addressed coordination store, and a hybrid store that layers a fast
//! local read agent over the hierarchical store.
//!
//! Its distinguishing feature is **parent-gated feature blocks**: a key may
//! be conditionally hidden unless a related parent key
//! (`{moduleId}_bind_block`) holds a value in an externally declared
//! enablement set, forming a lightweight two-level dependency graph over
//! otherwise flat configuration data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         ConfigFacade                            │
//! │                 (key validation, dispatch)                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Drivers                               │
//! │     FlatDriver      │     TreeDriver     │     HybridDriver     │
//! │   (camelCase codec, │  (path codec, node │  (agent read path,   │
//! │    prefix scans)    │   creation, walks) │   tree authority)    │
//! │                     shared: ParentGate                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Primitive Store Clients                       │
//! │        FlatStore    │    TreeStore    │    FastAgent            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`core::config`] - Settings parsing and validation
//! - [`core::error`] - Error types
//! - [`core::key`] - Logical key validation and derivation
//! - [`relation`] - Relation mapping (suffix -> enablement set)
//! - [`store`] - Primitive store traits and in-memory implementations
//! - [`store::connect`] - Multi-host connection acquisition
//! - [`drivers`] - Driver contract, gating, and the three drivers
//! - [`facade`] - The configuration facade
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use confgate::drivers::TreeDriver;
//! use confgate::facade::ConfigFacade;
//! use confgate::relation::RelationMap;
//! use confgate::store::memory::MemoryTreeStore;
//! use confgate::store::Acl;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryTreeStore::new());
//! let relation = Arc::new(RelationMap::empty());
//! let driver = TreeDriver::new(store, "/config".into(), Acl::any_ipv4(), relation);
//! let facade = ConfigFacade::with_driver(Box::new(driver));
//!
//! facade.set("7_feature_x", "on").unwrap();
//! assert_eq!(facade.get("7_feature_x", false).unwrap().as_deref(), Some("on"));
//! ```

pub mod cli;
pub mod core;
pub mod drivers;
pub mod facade;
pub mod relation;
pub mod store;

pub use crate::core::config::Settings;
pub use crate::core::error::{ConfgateError, ConfgateResult};
pub use crate::core::key::Key;
pub use crate::drivers::{ConfigDriver, Connectors, DriverKind};
pub use crate::facade::ConfigFacade;
pub use crate::relation::RelationMap;
