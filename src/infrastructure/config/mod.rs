//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML files under `.shame/`
//! - `SHAME_*` environment variable overrides
//! - Validation before the config is handed out

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
