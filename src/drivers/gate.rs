//! Parent gating.
//!
//! A key whose suffix appears in the relation mapping is only readable
//! while its module's `bind_block` key holds at least one of the declared
//! enablement values. The gate resolves the parent value through the same
//! backend as the gated key, memoizing the last resolved parent in a
//! single slot for the lifetime of the owning driver.
//!
//! Gating affects reads only; writes, deletes, and children enumeration
//! are never gated.

use crate::core::error::ConfgateResult;
use crate::core::key::Key;
use crate::relation::RelationMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Last resolved parent key and its raw value.
#[derive(Debug, Clone)]
struct MemoEntry {
    parent_key: String,
    value: String,
}

/// Read-time visibility gate with a single-slot parent memo.
pub struct ParentGate {
    relation: Arc<RelationMap>,
    memo: Mutex<Option<MemoEntry>>,
}

impl ParentGate {
    /// Create a gate over a process-static relation mapping.
    pub fn new(relation: Arc<RelationMap>) -> Self {
        Self {
            relation,
            memo: Mutex::new(None),
        }
    }

    /// Decide whether a key is visible.
    ///
    /// `fetch_parent` reads the parent key through the owning backend's
    /// primitive read path and returns `None` when the parent does not
    /// exist. It is only invoked on a memo miss, and only for keys that
    /// are actually gated.
    pub fn visible<F>(&self, key: &Key, fetch_parent: F) -> ConfgateResult<bool>
    where
        F: FnOnce(&str) -> ConfgateResult<Option<String>>,
    {
        let suffix = key.suffix();
        let Some(required) = self.relation.required_values(&suffix) else {
            return Ok(true);
        };
        let Some(parent_key) = key.parent() else {
            return Ok(true);
        };

        let parent_value = self.resolve_parent(&parent_key, fetch_parent)?;
        let Some(parent_value) = parent_value else {
            return Ok(false);
        };
        if parent_value.is_empty() {
            return Ok(false);
        }

        // Exact string membership over the parent's comma-separated set.
        Ok(parent_value.split(',').any(|part| required.contains(part)))
    }

    fn resolve_parent<F>(
        &self,
        parent_key: &str,
        fetch_parent: F,
    ) -> ConfgateResult<Option<String>>
    where
        F: FnOnce(&str) -> ConfgateResult<Option<String>>,
    {
        let mut memo = self.memo.lock();
        if let Some(ref entry) = *memo {
            if entry.parent_key == parent_key {
                return Ok(Some(entry.value.clone()));
            }
        }
        let fetched = fetch_parent(parent_key)?;
        if let Some(ref value) = fetched {
            *memo = Some(MemoEntry {
                parent_key: parent_key.to_string(),
                value: value.clone(),
            });
        }
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn gate(entries: &[(&str, &[&str])]) -> ParentGate {
        let relation = RelationMap::from_entries(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()))),
        );
        ParentGate::new(Arc::new(relation))
    }

    #[test]
    fn unrelated_key_passes_without_fetch() {
        let gate = gate(&[("enabled", &["1"])]);
        let key = Key::parse("10_other").unwrap();
        let visible = gate
            .visible(&key, |_| panic!("must not fetch"))
            .unwrap();
        assert!(visible);
    }

    #[test]
    fn non_numeric_lead_passes() {
        let gate = gate(&[("enabled", &["1"])]);
        let key = Key::parse("app_enabled").unwrap();
        assert!(gate.visible(&key, |_| Ok(None)).unwrap());
    }

    #[test]
    fn intersection_decides_visibility() {
        let gate = gate(&[("enabled", &["1", "2"])]);
        let key = Key::parse("10_enabled").unwrap();
        assert!(gate.visible(&key, |_| Ok(Some("1,3".into()))).unwrap());

        let gate = self::gate(&[("enabled", &["1", "2"])]);
        assert!(!gate.visible(&key, |_| Ok(Some("4".into()))).unwrap());
    }

    #[test]
    fn absent_or_empty_parent_hides() {
        let key = Key::parse("10_enabled").unwrap();
        let gate1 = gate(&[("enabled", &["1"])]);
        assert!(!gate1.visible(&key, |_| Ok(None)).unwrap());

        let gate2 = gate(&[("enabled", &["1"])]);
        assert!(!gate2.visible(&key, |_| Ok(Some(String::new()))).unwrap());
    }

    #[test]
    fn memo_avoids_refetch_for_same_parent() {
        let gate = gate(&[("enabled", &["1"]), ("mode", &["1"])]);
        let fetches = Cell::new(0u32);
        let fetch = |_: &str| {
            fetches.set(fetches.get() + 1);
            Ok(Some("1".to_string()))
        };
        let first = Key::parse("10_enabled").unwrap();
        let second = Key::parse("10_mode").unwrap();
        assert!(gate.visible(&first, fetch).unwrap());
        assert!(gate.visible(&second, fetch).unwrap());
        assert_eq!(fetches.get(), 1);
    }

    #[test]
    fn memo_misses_on_different_parent() {
        let gate = gate(&[("enabled", &["1"])]);
        let fetches = Cell::new(0u32);
        let fetch = |_: &str| {
            fetches.set(fetches.get() + 1);
            Ok(Some("1".to_string()))
        };
        let first = Key::parse("10_enabled").unwrap();
        let second = Key::parse("11_enabled").unwrap();
        assert!(gate.visible(&first, fetch).unwrap());
        assert!(gate.visible(&second, fetch).unwrap());
        assert_eq!(fetches.get(), 2);
    }
}
