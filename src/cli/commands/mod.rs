//! CLI command implementations.

mod config;
mod key;
mod relation;

pub use config::{run_config, ConfigArgs};
pub use key::{run_key, KeyArgs};
pub use relation::{run_relation, RelationArgs};
