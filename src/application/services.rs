//! Application wiring from configuration

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::CompletionError;
use crate::domain::models::Config;
use crate::domain::ports::{CompletionClient, NoRecordSource};
use crate::infrastructure::cache::InMemoryResultCache;
use crate::infrastructure::openrouter::OpenRouterClient;
use crate::services::{
    AgentContext, AgentSettings, DragonFireService, LongclawOrchestrator, SwarmRunner,
    SwarmSettings,
};

/// DragonFire and Longclaw wired to one completion client
#[derive(Clone)]
pub struct ShameServices {
    /// Swarm roast service
    pub dragonfire: DragonFireService,
    /// Chaos orchestrator and its agents
    pub longclaw: LongclawOrchestrator,
}

impl ShameServices {
    /// Build against the OpenRouter client described by `config`.
    ///
    /// # Errors
    /// Fails when no API key can be found or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let client = OpenRouterClient::from_settings(&config.completion)?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    /// Build against any completion client
    pub fn with_client(client: Arc<dyn CompletionClient>, config: &Config) -> Self {
        let mut swarm_settings = SwarmSettings::new(config.completion.swarm_model.clone());
        if let Some(limit) = config.swarm.max_in_flight {
            swarm_settings = swarm_settings.with_max_in_flight(limit);
        }
        let runner = SwarmRunner::new(Arc::clone(&client), swarm_settings);
        let dragonfire = DragonFireService::new(runner, config.swarm.default_swarm_size());

        let context = AgentContext::new(
            client,
            Arc::new(NoRecordSource),
            Arc::new(InMemoryResultCache::new()),
            AgentSettings {
                model: config.completion.agent_model.clone(),
                max_tokens: config.completion.max_tokens,
            },
        );
        let longclaw = LongclawOrchestrator::standard(context);

        info!(
            swarm_model = %config.completion.swarm_model,
            agent_model = %config.completion.agent_model,
            default_swarm_size = config.swarm.default_size,
            "services ready"
        );

        Self {
            dragonfire,
            longclaw,
        }
    }
}
