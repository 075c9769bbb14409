//! Flat-store driver.
//!
//! Logical keys are folded into camelCase identifiers: the key is split on
//! `/` and `_`, each word is title-cased, the words are concatenated, and
//! the first character is lower-cased again. A configured physical prefix
//! is prepended to every encoded key and stripped on decode. The encoding
//! is case-normalizing, so decoding reproduces the logical key in lower
//! case with `/` folded into `_`.
//!
//! Hierarchy is emulated: children queries are prefix scans over the
//! backend's key space, with backend-dependent ordering.

use crate::core::error::ConfgateResult;
use crate::core::key::Key;
use crate::drivers::gate::ParentGate;
use crate::drivers::{ConfigDriver, DriverKind};
use crate::relation::RelationMap;
use crate::store::FlatStore;
use std::sync::Arc;

/// Encode a logical key as a camelCase identifier (without prefix).
pub fn camel_encode(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for word in key.split(['/', '_']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}

/// Decode a camelCase identifier back to logical key form.
///
/// Inserts `_` before each internal uppercase letter, then lower-cases
/// everything.
pub fn camel_decode(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + 4);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Driver over a flat cache-style store.
pub struct FlatDriver {
    store: Arc<dyn FlatStore>,
    prefix: String,
    gate: ParentGate,
}

impl FlatDriver {
    /// Create a driver over an established store connection.
    pub fn new(store: Arc<dyn FlatStore>, prefix: String, relation: Arc<RelationMap>) -> Self {
        Self {
            store,
            prefix,
            gate: ParentGate::new(relation),
        }
    }

    fn encode(&self, key: &str) -> String {
        format!("{}{}", self.prefix, camel_encode(key))
    }

    fn decode(&self, physical: &str) -> String {
        let stripped = physical.strip_prefix(&self.prefix).unwrap_or(physical);
        camel_decode(stripped)
    }

    fn read_parent(&self, parent_key: &str) -> ConfgateResult<Option<String>> {
        let physical = self.encode(parent_key);
        if self.store.exists(&physical)? {
            self.store.get(&physical)
        } else {
            Ok(None)
        }
    }
}

impl ConfigDriver for FlatDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Flat
    }

    fn get(&self, key: &Key, ignore_block: bool) -> ConfgateResult<Option<String>> {
        if !ignore_block && !self.gate.visible(key, |pk| self.read_parent(pk))? {
            tracing::debug!(key = %key, "key hidden by parent gate");
            return Ok(None);
        }
        let physical = self.encode(key.as_str());
        if self.store.exists(&physical)? {
            self.store.get(&physical)
        } else {
            // First read of a never-written key materializes an empty
            // placeholder.
            self.store.set(&physical, "")?;
            tracing::debug!(key = %key, "provisioned empty placeholder");
            Ok(None)
        }
    }

    fn set(&self, key: &Key, value: &str) -> ConfgateResult<bool> {
        self.store.set(&self.encode(key.as_str()), value)
    }

    fn delete(&self, key: &Key) -> ConfgateResult<bool> {
        let physical = self.encode(key.as_str());
        if self.store.exists(&physical)? {
            self.store.delete(&physical)
        } else {
            Ok(false)
        }
    }

    fn children(&self, key: &Key) -> ConfgateResult<Vec<String>> {
        let matches = self.store.keys_with_prefix(&self.encode(key.as_str()))?;
        Ok(matches.iter().map(|m| self.decode(m)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_folds_separators_into_camel_case() {
        assert_eq!(camel_encode("12_feature_enabled"), "12FeatureEnabled");
        assert_eq!(camel_encode("app_name"), "appName");
        assert_eq!(camel_encode("a/b_c"), "aBC");
    }

    #[test]
    fn decode_reverses_camel_case() {
        assert_eq!(camel_decode("12FeatureEnabled"), "12_feature_enabled");
        assert_eq!(camel_decode("appName"), "app_name");
    }

    #[test]
    fn round_trip_up_to_case_normalization() {
        for key in ["12_feature_enabled", "app_name", "7_bind_block", "solo"] {
            assert_eq!(camel_decode(&camel_encode(key)), key);
        }
    }
}
