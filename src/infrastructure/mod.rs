//! Infrastructure layer module
//!
//! Adapters for the domain ports and process-level concerns:
//! - OpenRouter completion client
//! - In-memory result cache
//! - Configuration management
//! - Logging infrastructure

pub mod cache;
pub mod config;
pub mod logging;
pub mod openrouter;
