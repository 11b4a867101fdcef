//! Shame - chaos roasting service
//!
//! Two entry points share one completion client:
//!
//! - **DragonFire**: fans one roast prompt out to a swarm of concurrent
//!   completions at staggered temperatures, discards failures, crowns a
//!   winner and reports how much of the swarm diverged.
//! - **Longclaw**: classifies free-text chaos (decks, PRDs, tickets),
//!   hands it to the matching agent, and fuses the agent's truth into a
//!   final roast.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): value types, errors and port traits
//! - **Service Layer** (`services`): swarm pipeline, agents, orchestrator
//! - **Application Layer** (`application`): wiring from configuration
//! - **Infrastructure Layer** (`infrastructure`): OpenRouter client,
//!   config loading, logging, caching
//! - **Adapters** (`adapters`): HTTP API
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use application::ShameServices;
pub use domain::models::{ChaosInput, ChaosKind, Config, SwarmReport, SwarmSize};
pub use domain::ports::{CompletionClient, RecordSource, ResultCache};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DragonFireService, LongclawOrchestrator, SwarmRunner};
