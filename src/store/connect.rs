//! Connection acquisition.
//!
//! Store connections are established once per process and then reused.
//! Tree stores are usually deployed as an ensemble behind a comma-separated
//! host list; acquisition picks hosts uniformly at random, probes each
//! candidate with a sentinel existence check, and gives up permanently
//! after a bounded number of attempts. No operation after acquisition is
//! ever retried.

use crate::core::config::FlatParams;
use crate::core::error::{ConfgateError, ConfgateResult};
use crate::store::{FlatStore, TreeStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Fixed connect timeout applied to every connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum connection attempts before failing permanently.
pub const ACQUIRE_ATTEMPTS: usize = 3;

/// Well-known always-present path used as the acquisition probe target.
pub const SENTINEL_PATH: &str = "/";

/// Factory for flat-store connections.
pub trait FlatConnector: Send + Sync {
    /// Connect, authenticate, and select the configured database.
    fn connect(
        &self,
        params: &FlatParams,
        timeout: Duration,
    ) -> ConfgateResult<Arc<dyn FlatStore>>;
}

/// Factory for tree-store connections to a single host.
pub trait TreeConnector: Send + Sync {
    /// Connect to one host of the ensemble.
    fn connect(&self, host: &str, timeout: Duration) -> ConfgateResult<Arc<dyn TreeStore>>;
}

/// Establish the process-wide flat-store connection.
pub fn acquire_flat(
    connector: &dyn FlatConnector,
    params: &FlatParams,
) -> ConfgateResult<Arc<dyn FlatStore>> {
    tracing::debug!(host = %params.host, port = params.port, "connecting to flat store");
    connector.connect(params, CONNECT_TIMEOUT).map_err(|e| {
        ConfgateError::ConnectionFailed {
            message: format!("flat store {}:{}: {e}", params.host, params.port),
        }
    })
}

/// Establish the process-wide tree-store connection.
///
/// With multiple configured hosts, each of the bounded attempts picks a
/// host uniformly at random from the remaining candidates and removes it
/// on failure. With a single host, the same host is retried.
pub fn acquire_tree(
    connector: &dyn TreeConnector,
    address: &str,
) -> ConfgateResult<Arc<dyn TreeStore>> {
    let mut candidates: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect();
    if candidates.is_empty() {
        return Err(ConfgateError::params("tree address lists no hosts"));
    }

    let single = candidates.len() == 1;
    let mut rng = rand::thread_rng();
    let mut last_error = String::new();

    for attempt in 1..=ACQUIRE_ATTEMPTS {
        let index = if single {
            0
        } else {
            rng.gen_range(0..candidates.len())
        };
        let host = candidates[index];
        tracing::debug!(host, attempt, "probing tree store");
        match probe(connector, host) {
            Ok(store) => {
                tracing::info!(host, attempt, "tree store connection established");
                return Ok(store);
            }
            Err(e) => {
                tracing::warn!(host, attempt, error = %e, "tree store probe failed");
                last_error = e.to_string();
                if !single {
                    candidates.swap_remove(index);
                    if candidates.is_empty() {
                        break;
                    }
                }
            }
        }
    }

    Err(ConfgateError::ConnectionFailed {
        message: format!("tree store unreachable after {ACQUIRE_ATTEMPTS} attempts: {last_error}"),
    })
}

/// Connect to a host and verify it serves the sentinel path.
fn probe(connector: &dyn TreeConnector, host: &str) -> ConfgateResult<Arc<dyn TreeStore>> {
    let store = connector.connect(host, CONNECT_TIMEOUT)?;
    if store.exists(SENTINEL_PATH)? {
        Ok(store)
    } else {
        Err(ConfgateError::ConnectionFailed {
            message: format!("host {host} failed the sentinel check"),
        })
    }
}
