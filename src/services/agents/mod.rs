//! Chaos agents.
//!
//! Each agent handles one [`ChaosKind`]: it looks up records, builds a
//! prompt, asks the completion service for a roast, and returns the roast
//! with a structured [`Truth`](crate::domain::models::Truth). Results are
//! cached by input hash.

pub mod bell;
pub mod samples;
pub mod valyria;
pub mod walk;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::AgentError;
use crate::domain::models::{cache_key, AgentResult, ChaosInput, ChaosKind, CompletionRequest};
use crate::domain::ports::{CompletionClient, RecordSource, ResultCache};

pub use bell::BellAgent;
pub use valyria::ValyriaAgent;
pub use walk::WalkAgent;

/// One specialist that turns chaos into a roast
#[async_trait]
pub trait ChaosAgent: Send + Sync {
    /// Route name of the agent (e.g., "valyria")
    fn name(&self) -> &'static str;

    /// Roast the input and extract its truth
    async fn execute(&self, input: &ChaosInput) -> Result<AgentResult, AgentError>;
}

/// Completion parameters for agent calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Model for agent completions
    pub model: String,
    /// Token limit per completion
    pub max_tokens: u32,
}

/// Collaborators shared by every agent
#[derive(Clone)]
pub struct AgentContext {
    /// Completion service
    pub client: Arc<dyn CompletionClient>,
    /// Source records
    pub records: Arc<dyn RecordSource>,
    /// Result cache
    pub cache: Arc<dyn ResultCache>,
    /// Completion parameters
    pub settings: AgentSettings,
}

impl AgentContext {
    /// Bundle the collaborators
    pub fn new(
        client: Arc<dyn CompletionClient>,
        records: Arc<dyn RecordSource>,
        cache: Arc<dyn ResultCache>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            client,
            records,
            cache,
            settings,
        }
    }

    /// One system-plus-user completion with the agent model
    pub async fn roast(&self, system: &str, user: &str) -> Result<String, AgentError> {
        let request = CompletionRequest::chat(
            &self.settings.model,
            system,
            user,
            self.settings.max_tokens,
        );
        Ok(self.client.complete_text(request).await?)
    }

    /// Cached result for `prefix` + hash of `input`.
    ///
    /// A stored value that does not decode as an [`AgentResult`] is a miss.
    pub fn cached(&self, prefix: &str, input: &str) -> Option<AgentResult> {
        let key = cache_key(prefix, input);
        let value = self.cache.get(&key)?;
        match serde_json::from_value(value) {
            Ok(result) => {
                debug!(%key, "agent cache hit");
                Some(result)
            }
            Err(err) => {
                debug!(%key, error = %err, "ignoring undecodable cache entry");
                None
            }
        }
    }

    /// Cache `result` under `prefix` + hash of `input`
    ///
    /// # Errors
    /// Fails when `result` cannot be encoded as JSON.
    pub fn store<T: serde::Serialize>(
        &self,
        prefix: &str,
        input: &str,
        result: &T,
    ) -> Result<(), AgentError> {
        let value = serde_json::to_value(result)?;
        self.cache.put(&cache_key(prefix, input), value);
        Ok(())
    }
}

/// The three agents, addressable by name or by chaos kind
#[derive(Clone)]
pub struct AgentRoster {
    /// Deck agent
    pub valyria: Arc<dyn ChaosAgent>,
    /// PRD agent
    pub walk: Arc<dyn ChaosAgent>,
    /// Ticket agent
    pub bell: Arc<dyn ChaosAgent>,
}

impl AgentRoster {
    /// Roster of the built-in agents sharing one context
    pub fn standard(context: &AgentContext) -> Self {
        Self {
            valyria: Arc::new(ValyriaAgent::new(context.clone())),
            walk: Arc::new(WalkAgent::new(context.clone())),
            bell: Arc::new(BellAgent::new(context.clone())),
        }
    }

    /// Agent that handles `kind`
    pub fn for_kind(&self, kind: ChaosKind) -> &Arc<dyn ChaosAgent> {
        match kind {
            ChaosKind::Deck => &self.valyria,
            ChaosKind::Prd => &self.walk,
            ChaosKind::Ticket => &self.bell,
        }
    }

    /// Look up an agent by route name, case-sensitively
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn ChaosAgent>> {
        match name {
            valyria::NAME => Some(&self.valyria),
            walk::NAME => Some(&self.walk),
            bell::NAME => Some(&self.bell),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::domain::models::Truth;
    use crate::domain::ports::NoRecordSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_roast_uses_agent_model_and_limit() {
        let client = ScriptedClient::new("  burn  ");
        let (context, _) = context(client.clone(), Arc::new(NoRecordSource));

        let roast = context.roast("system", "user").await.unwrap();

        assert_eq!(roast, "burn");
        let request = client.last();
        assert_eq!(request.model, "anthropic/claude-3.5-sonnet-20241022");
        assert_eq!(request.max_tokens, Some(4096));
        assert_eq!(request.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let client = ScriptedClient::new("   ");
        let (context, _) = context(client, Arc::new(NoRecordSource));
        assert!(context.roast("system", "user").await.is_err());
    }

    #[test]
    fn test_cache_round_trip_and_bad_entries() {
        let (context, cache) = context(ScriptedClient::new("x"), Arc::new(NoRecordSource));
        let result = AgentResult {
            roast: "burn".to_string(),
            truth: Truth::default(),
        };

        context.store("walk_", "spec", &result).unwrap();
        assert_eq!(context.cached("walk_", "spec"), Some(result));
        assert_eq!(context.cached("bell_", "spec"), None);

        cache.put(&cache_key("bell_", "spec"), json!({ "roast": 7 }));
        assert_eq!(context.cached("bell_", "spec"), None);
    }

    #[test]
    fn test_roster_lookup() {
        let (context, _) = context(ScriptedClient::new("x"), Arc::new(NoRecordSource));
        let roster = AgentRoster::standard(&context);

        assert_eq!(roster.for_kind(ChaosKind::Deck).name(), "valyria");
        assert_eq!(roster.for_kind(ChaosKind::Prd).name(), "walk");
        assert_eq!(roster.for_kind(ChaosKind::Ticket).name(), "bell");
        assert_eq!(roster.by_name("bell").map(|a| a.name()), Some("bell"));
        assert!(roster.by_name("dragon").is_none());
    }
}
