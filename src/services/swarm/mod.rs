//! DragonFire swarm pipeline.
//!
//! dispatch -> collect -> select -> report. Each stage is a separate module
//! so it can be tested in isolation; [`SwarmRunner`] wires them together.

pub mod collector;
pub mod dispatcher;
pub mod selector;

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::SwarmError;
use crate::domain::models::{SwarmReport, SwarmSize, MAX_SWARM_SIZE};
use crate::domain::ports::CompletionClient;

pub use collector::{collect_survivors, settle};
pub use dispatcher::{build_requests, dispatch, Settlement};
pub use selector::{has_bias, select_winner};

/// Settings for one swarm runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmSettings {
    /// Model every member is sent to
    pub model: String,
    /// Optional bound on concurrently in-flight members
    pub max_in_flight: Option<usize>,
}

impl SwarmSettings {
    /// Unbounded settings for `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_in_flight: None,
        }
    }

    /// Cap the number of members in flight at once
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }
}

/// Runs the full swarm pipeline against a completion client
#[derive(Clone)]
pub struct SwarmRunner {
    client: Arc<dyn CompletionClient>,
    settings: SwarmSettings,
}

impl SwarmRunner {
    /// Runner sending every member through `client`
    pub fn new(client: Arc<dyn CompletionClient>, settings: SwarmSettings) -> Self {
        Self { client, settings }
    }

    /// Settings this runner was built with
    pub fn settings(&self) -> &SwarmSettings {
        &self.settings
    }

    /// Dispatch `size` members, wait for all to settle, and crown a winner.
    ///
    /// # Errors
    ///
    /// `InvalidPrompt` for a blank prompt and `TooLarge` for a size above
    /// [`MAX_SWARM_SIZE`] (nothing is dispatched in either case), and
    /// `TotalFailure` when no member yields text.
    #[instrument(
        skip(self, prompt),
        fields(run_id = %Uuid::new_v4(), swarm_size = size.get(), model = %self.settings.model)
    )]
    pub async fn run(&self, prompt: &str, size: SwarmSize) -> Result<SwarmReport, SwarmError> {
        if prompt.trim().is_empty() {
            return Err(SwarmError::InvalidPrompt);
        }
        if !size.is_dispatchable() {
            warn!(requested = size.get(), max = MAX_SWARM_SIZE, "swarm size rejected");
            return Err(SwarmError::TooLarge {
                requested: size.get(),
                max: MAX_SWARM_SIZE,
            });
        }

        let requests = build_requests(prompt, size);
        let settlements = dispatch(
            self.client.as_ref(),
            &self.settings.model,
            requests,
            self.settings.max_in_flight,
        )
        .await;
        let dispatched = settlements.len();

        let survivors = collect_survivors(settlements).inspect_err(|_| {
            warn!(dispatched, "every swarm member failed");
        })?;

        let winner = select_winner(&survivors)
            .map(ToString::to_string)
            .ok_or(SwarmError::TotalFailure { dispatched })?;

        let report = SwarmReport::new(winner, dispatched, survivors.len());
        info!(
            dispatched,
            survivors = report.survivor_count(),
            divergence = report.divergence_percent(),
            "swarm run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CompletionError;
    use crate::domain::models::{CompletionEnvelope, CompletionRequest};
    use async_trait::async_trait;

    /// Fails every member whose temperature is in `failing`
    struct RampClient {
        failing: Vec<f64>,
    }

    #[async_trait]
    impl CompletionClient for RampClient {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionEnvelope, CompletionError> {
            let temperature = request.temperature.unwrap_or_default();
            if self.failing.iter().any(|t| (t - temperature).abs() < 1e-9) {
                return Err(CompletionError::Timeout);
            }
            Ok(CompletionEnvelope::from_text(format!("roast at {temperature:.2}")))
        }
    }

    fn runner(failing: Vec<f64>) -> SwarmRunner {
        SwarmRunner::new(
            Arc::new(RampClient { failing }),
            SwarmSettings::new("grok-beta"),
        )
    }

    #[tokio::test]
    async fn test_run_reports_divergence() {
        let report = runner(vec![0.80, 0.82, 0.84])
            .run("Roast Microsoft", SwarmSize::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(report.total_dispatched(), 10);
        assert_eq!(report.survivor_count(), 7);
        assert_eq!(report.divergence_percent(), 30);
        // All survivors share a length, so the first one in dispatch order wins
        assert_eq!(report.winning_text(), "roast at 0.86");
    }

    #[tokio::test]
    async fn test_run_total_failure() {
        let all: Vec<f64> = (0..10).map(crate::domain::models::temperature_for).collect();
        let result = runner(all)
            .run("Roast Microsoft", SwarmSize::new(10).unwrap())
            .await;
        assert_eq!(result, Err(SwarmError::TotalFailure { dispatched: 10 }));
    }

    #[tokio::test]
    async fn test_run_rejects_blank_prompt() {
        let result = runner(Vec::new())
            .run("   ", SwarmSize::new(3).unwrap())
            .await;
        assert_eq!(result, Err(SwarmError::InvalidPrompt));
    }

    #[tokio::test]
    async fn test_run_rejects_oversized_swarm() {
        let result = runner(Vec::new())
            .run("Roast Microsoft", SwarmSize::new(usize::MAX).unwrap())
            .await;
        assert_eq!(
            result,
            Err(SwarmError::TooLarge {
                requested: usize::MAX,
                max: MAX_SWARM_SIZE,
            })
        );

        let report = runner(Vec::new())
            .run("Roast Microsoft", SwarmSize::new(MAX_SWARM_SIZE).unwrap())
            .await
            .unwrap();
        assert_eq!(report.total_dispatched(), MAX_SWARM_SIZE);
    }

    #[test]
    fn test_settings_builder() {
        let settings = SwarmSettings::new("grok-beta").with_max_in_flight(32);
        assert_eq!(settings.model, "grok-beta");
        assert_eq!(settings.max_in_flight, Some(32));
    }
}
