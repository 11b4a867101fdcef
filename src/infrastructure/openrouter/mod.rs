//! OpenRouter completion client
//!
//! Implements the [`CompletionClient`](crate::domain::ports::CompletionClient)
//! port over the OpenRouter chat-completions HTTP API using reqwest.

pub mod client;
pub mod types;

pub use client::{resolve_api_key, OpenRouterClient, OpenRouterConfig, API_KEY_VARS};
