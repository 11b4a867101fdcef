//! Domain layer for the Shame service
//!
//! Core value types, the swarm model, and the port traits implemented by
//! infrastructure adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AgentError, CompletionError, RecordSourceError, SwarmError};
