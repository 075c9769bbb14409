//! Connection acquisition tests using scripted connectors.

use confgate::core::config::FlatParams;
use confgate::store::connect::{acquire_flat, acquire_tree, FlatConnector, TreeConnector};
use confgate::store::memory::{MemoryFlatStore, MemoryTreeStore};
use confgate::store::{Acl, FlatStore, TreeStore};
use confgate::{ConfgateError, ConfgateResult};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Tree connector scripted with a set of healthy hosts; records every
/// attempted host in order.
struct ScriptedTreeConnector {
    healthy: Vec<&'static str>,
    attempts: Mutex<Vec<String>>,
}

impl ScriptedTreeConnector {
    fn new(healthy: &[&'static str]) -> Self {
        Self {
            healthy: healthy.to_vec(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }
}

impl TreeConnector for ScriptedTreeConnector {
    fn connect(&self, host: &str, _timeout: Duration) -> ConfgateResult<Arc<dyn TreeStore>> {
        self.attempts.lock().push(host.to_string());
        if self.healthy.contains(&host) {
            Ok(Arc::new(MemoryTreeStore::new()))
        } else {
            Err(ConfgateError::ConnectionFailed {
                message: format!("refused by {host}"),
            })
        }
    }
}

/// Tree store whose sentinel check reports the root as absent.
#[derive(Debug)]
struct SentinellessStore;

impl TreeStore for SentinellessStore {
    fn exists(&self, _path: &str) -> ConfgateResult<bool> {
        Ok(false)
    }
    fn get(&self, _path: &str) -> ConfgateResult<Option<String>> {
        Ok(None)
    }
    fn set(&self, _path: &str, _value: &str) -> ConfgateResult<bool> {
        Ok(false)
    }
    fn delete(&self, _path: &str) -> ConfgateResult<bool> {
        Ok(false)
    }
    fn create(&self, path: &str, _value: &str, _acl: &Acl) -> ConfgateResult<String> {
        Ok(path.to_string())
    }
    fn list_children(&self, _path: &str) -> ConfgateResult<Vec<String>> {
        Ok(Vec::new())
    }
}

struct SentinellessConnector;

impl TreeConnector for SentinellessConnector {
    fn connect(&self, _host: &str, _timeout: Duration) -> ConfgateResult<Arc<dyn TreeStore>> {
        Ok(Arc::new(SentinellessStore))
    }
}

// ============================================================================
// Tree acquisition
// ============================================================================

#[test]
fn multi_host_finds_the_healthy_member() {
    // Hosts are drawn without replacement, so with a single healthy member
    // among three the acquisition must land on it within the attempt budget.
    let connector =
        ScriptedTreeConnector::new(&["c.example:2181"]);
    let store = acquire_tree(&connector, "a.example:2181, b.example:2181, c.example:2181");
    assert!(store.is_ok());
    assert_eq!(connector.attempts().last().map(String::as_str), Some("c.example:2181"));
}

#[test]
fn multi_host_all_down_tries_each_host_once() {
    let connector = ScriptedTreeConnector::new(&[]);
    let err = acquire_tree(&connector, "a:1,b:1,c:1").unwrap_err();
    assert!(matches!(err, ConfgateError::ConnectionFailed { .. }));

    let mut attempts = connector.attempts();
    attempts.sort();
    assert_eq!(attempts, vec!["a:1", "b:1", "c:1"]);
}

#[test]
fn two_hosts_down_stops_when_candidates_run_out() {
    // Two candidates, three allowed attempts: exhausting the list ends the
    // acquisition early.
    let connector = ScriptedTreeConnector::new(&[]);
    assert!(acquire_tree(&connector, "a:1,b:1").is_err());
    assert_eq!(connector.attempts().len(), 2);
}

#[test]
fn single_host_is_retried_up_to_the_attempt_budget() {
    let connector = ScriptedTreeConnector::new(&[]);
    assert!(acquire_tree(&connector, "only.example:2181").is_err());
    assert_eq!(
        connector.attempts(),
        vec!["only.example:2181"; 3]
    );
}

#[test]
fn single_healthy_host_connects_on_the_first_attempt() {
    let connector = ScriptedTreeConnector::new(&["only.example:2181"]);
    assert!(acquire_tree(&connector, "only.example:2181").is_ok());
    assert_eq!(connector.attempts().len(), 1);
}

#[test]
fn empty_address_is_rejected_up_front() {
    let connector = ScriptedTreeConnector::new(&[]);
    for address in ["", " , ,"] {
        let err = acquire_tree(&connector, address).unwrap_err();
        assert!(matches!(err, ConfgateError::InvalidParams { .. }));
        assert!(connector.attempts().is_empty());
    }
}

#[test]
fn sentinel_failure_counts_as_a_failed_probe() {
    // Connecting succeeds but the sentinel path is missing, so the host is
    // treated as unhealthy.
    let err = acquire_tree(&SentinellessConnector, "a:1").unwrap_err();
    assert!(matches!(err, ConfgateError::ConnectionFailed { .. }));
}

// ============================================================================
// Flat acquisition
// ============================================================================

struct FailingFlatConnector;

impl FlatConnector for FailingFlatConnector {
    fn connect(
        &self,
        _params: &FlatParams,
        _timeout: Duration,
    ) -> ConfgateResult<Arc<dyn FlatStore>> {
        Err(ConfgateError::ConnectionFailed {
            message: "refused".to_string(),
        })
    }
}

#[test]
fn flat_acquisition_wraps_the_connector_error() {
    let params = FlatParams {
        host: "cache.example".to_string(),
        port: 6379,
        password: None,
        database: None,
        prefix: "config".to_string(),
    };
    let err = acquire_flat(&FailingFlatConnector, &params).unwrap_err();
    match err {
        ConfgateError::ConnectionFailed { message } => {
            assert!(message.contains("cache.example:6379"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn flat_acquisition_passes_the_store_through() {
    let store = Arc::new(MemoryFlatStore::new());
    let connector = confgate::store::memory::MemoryFlatConnector::new(store);
    let params = FlatParams {
        host: "cache.example".to_string(),
        port: 6379,
        password: None,
        database: None,
        prefix: "config".to_string(),
    };
    assert!(acquire_flat(&connector, &params).is_ok());
}
