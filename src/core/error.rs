//! Error types.
//!
//! Confgate surfaces a single error enum to callers. Misses are not errors:
//! a read of a non-existent or gated key resolves to `None`, and callers
//! must treat `None` as "no value / hidden" rather than a failure signal.

use thiserror::Error;

/// Common confgate error conditions.
#[derive(Debug, Error)]
pub enum ConfgateError {
    /// Bootstrap configuration is missing or inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Driver name does not match any known backend kind.
    #[error("unknown driver: {name}")]
    UnknownDriver { name: String },

    /// A backend capability required by the selected driver is not available
    /// (e.g. the hybrid driver was selected without a fast agent).
    #[error("missing capability: {message}")]
    MissingCapability { message: String },

    /// Required connection parameters are missing or malformed.
    #[error("invalid connection parameters: {message}")]
    InvalidParams { message: String },

    /// Connection could not be established after exhausting retries.
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Key is malformed (empty, leading underscore, or double underscore).
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Relation source has the wrong format or does not deserialize
    /// to a mapping.
    #[error("invalid relation source: {message}")]
    RelationFormat { message: String },

    /// A primitive store operation failed after the connection was
    /// established. Never retried; surfaced immediately.
    #[error("store operation failed: {message}")]
    Store { message: String },

    /// Delete targeted a tree path that still has children.
    #[error("path {path} has children; delete leaves first")]
    DeleteNonLeaf { path: String },

    /// Tree traversal exceeded the defensive depth bound.
    #[error("path depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

impl ConfgateError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a connection-parameter error.
    pub fn params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a store-surface error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a relation-source error.
    pub fn relation(message: impl Into<String>) -> Self {
        Self::RelationFormat {
            message: message.into(),
        }
    }

    /// Check whether this error was raised before a connection existed.
    pub fn is_bootstrap(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::UnknownDriver { .. }
                | Self::MissingCapability { .. }
                | Self::InvalidParams { .. }
                | Self::ConnectionFailed { .. }
        )
    }
}

/// Result type using ConfgateError.
pub type ConfgateResult<T> = Result<T, ConfgateError>;
