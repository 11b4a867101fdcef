//! Domain models

pub mod cache_key;
pub mod chaos;
pub mod completion;
pub mod config;
pub mod records;
pub mod swarm;

pub use cache_key::{cache_key, stable_hash};
pub use chaos::{AgentResult, ChaosInput, ChaosKind, LongclawResult, Truth};
pub use completion::{
    ChatMessage, Choice, ChoiceMessage, CompletionEnvelope, CompletionRequest, Content,
    ContentPart, Role,
};
pub use config::{CompletionConfig, Config, LoggingConfig, ServerConfig, SwarmConfig};
pub use records::{DeckFile, DocVersion, SizeDelta, TicketComment};
pub use swarm::{
    divergence_fraction, divergence_percent, temperature_for, SwarmOutcome, SwarmReport,
    SwarmRequest, SwarmSize, MAX_SWARM_SIZE,
};
