//! Logical key validation and derivation.
//!
//! A logical key is an underscore-delimited identifier independent of any
//! backend's addressing, e.g. `12_feature_enabled`. The leading segment,
//! when numeric, names the module/block the key belongs to; the remaining
//! segments name the attribute within that block.

use crate::core::error::{ConfgateError, ConfgateResult};

/// Suffix appended to a module id to form its gating key.
pub const BIND_BLOCK_SUFFIX: &str = "bind_block";

/// A validated logical key.
///
/// Construction enforces the format rules shared by every driver:
/// non-empty, no leading underscore, no double underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    /// Validate and wrap a raw key string.
    pub fn parse(raw: &str) -> ConfgateResult<Self> {
        if raw.is_empty() {
            return Err(ConfgateError::InvalidKey {
                key: raw.to_string(),
                reason: "key is empty".to_string(),
            });
        }
        if raw.starts_with('_') {
            return Err(ConfgateError::InvalidKey {
                key: raw.to_string(),
                reason: "key starts with underscore".to_string(),
            });
        }
        if raw.contains("__") {
            return Err(ConfgateError::InvalidKey {
                key: raw.to_string(),
                reason: "key contains double underscore".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Underscore-delimited segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('_')
    }

    /// The attribute suffix: every segment after the first, rejoined.
    ///
    /// Used to look the key up in the relation mapping. A single-segment
    /// key has an empty suffix.
    pub fn suffix(&self) -> String {
        match self.0.split_once('_') {
            Some((_, rest)) => rest.to_string(),
            None => String::new(),
        }
    }

    /// The gating key for this key's module, if it has one.
    ///
    /// Keys whose leading segment is not numeric belong to no module and
    /// have no parent; gating is skipped for them.
    pub fn parent(&self) -> Option<String> {
        let first = self.0.split('_').next()?;
        if first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{first}_{BIND_BLOCK_SUFFIX}"))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
