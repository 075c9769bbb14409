//! Relation mapping: which parent values enable which keys.
//!
//! The relation source is an externally maintained JSON file mapping a
//! logical key's attribute suffix to the set of values its module's
//! `bind_block` key must hold for the key to be readable:
//!
//! ```json
//! {
//!     "feature_x": ["on"],
//!     "enabled": ["1", "2"],
//!     "mode": "standard"
//! }
//! ```
//!
//! Scalar values (string or number) are accepted as singleton sets. The
//! mapping is loaded once per facade; an absent file or an empty mapping
//! disables gating entirely.

use crate::core::config::RelationSource;
use crate::core::error::{ConfgateError, ConfgateResult};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Default relation file location, used when no path is configured or the
/// configured path does not exist on disk.
pub const DEFAULT_RELATION_PATH: &str = "config/relation.json";

/// Process-static mapping from key suffix to enablement set.
#[derive(Debug, Clone, Default)]
pub struct RelationMap {
    entries: HashMap<String, BTreeSet<String>>,
}

impl RelationMap {
    /// An empty mapping; gating passes trivially for every key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mapping from explicit entries.
    pub fn from_entries<I, S, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(suffix, values)| {
                    (
                        suffix.into(),
                        values.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Load the mapping for the given source configuration.
    ///
    /// A configured path that exists is authoritative and must be valid.
    /// A configured path missing on disk falls back to the default
    /// location; if that is missing too, gating is disabled.
    pub fn load(source: &RelationSource) -> ConfgateResult<Self> {
        if let Some(ref configured) = source.path {
            let path = Path::new(configured);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }
        let default = Path::new(DEFAULT_RELATION_PATH);
        if default.exists() {
            Self::load_from_path(default)
        } else {
            Ok(Self::empty())
        }
    }

    /// Load and validate a relation file.
    pub fn load_from_path(path: &Path) -> ConfgateResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {}
            other => {
                return Err(ConfgateError::relation(format!(
                    "relation file must be JSON, got extension {:?}: {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfgateError::relation(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse a relation mapping from a JSON string.
    pub fn from_json(content: &str) -> ConfgateResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| ConfgateError::relation(format!("invalid JSON: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| ConfgateError::relation("relation source must be a mapping"))?;

        let mut entries = HashMap::with_capacity(object.len());
        for (suffix, raw) in object {
            entries.insert(suffix.clone(), parse_enablement_set(suffix, raw)?);
        }
        Ok(Self { entries })
    }

    /// The enablement set for a key suffix, if one is declared.
    pub fn required_values(&self, suffix: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(suffix)
    }

    /// Whether the mapping declares no relations (gating disabled).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of declared relations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn parse_enablement_set(
    suffix: &str,
    raw: &serde_json::Value,
) -> ConfgateResult<BTreeSet<String>> {
    match raw {
        serde_json::Value::String(s) => Ok(BTreeSet::from([s.clone()])),
        serde_json::Value::Number(n) => Ok(BTreeSet::from([n.to_string()])),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s.clone()),
                serde_json::Value::Number(n) => Ok(n.to_string()),
                other => Err(ConfgateError::relation(format!(
                    "relation entry {suffix:?} contains a non-scalar element: {other}"
                ))),
            })
            .collect(),
        other => Err(ConfgateError::relation(format!(
            "relation entry {suffix:?} must be a string, number, or array, got: {other}"
        ))),
    }
}
