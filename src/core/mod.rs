//! Core types: settings, errors, and logical keys.

pub mod config;
pub mod error;
pub mod key;

pub use config::{Settings, SettingsOverrides};
pub use error::{ConfgateError, ConfgateResult};
pub use key::Key;
