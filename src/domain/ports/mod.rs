//! Port trait definitions (Hexagonal Architecture)
//!
//! - CompletionClient: calls to the text-generation endpoint
//! - ResultCache: key-value store for agent results
//! - RecordSource: lookups of decks, spec versions and ticket comments
//!
//! These traits let the swarm and the agents run against any adapter,
//! including in-memory fakes in tests.

pub mod completion_client;
pub mod record_source;
pub mod result_cache;

pub use completion_client::CompletionClient;
pub use record_source::{NoRecordSource, RecordSource};
pub use result_cache::ResultCache;
