//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use shame::domain::errors::CompletionError;
use shame::domain::models::{CompletionEnvelope, CompletionRequest};
use shame::domain::ports::CompletionClient;

/// Completion client that fails for chosen temperatures and echoes the rest
///
/// Successful replies read `roast at {temperature:.2}`.
#[derive(Default)]
pub struct TemperatureClient {
    failing: Vec<f64>,
    reply_suffix: Vec<(f64, String)>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl TemperatureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, temperatures: &[f64]) -> Self {
        self.failing.extend_from_slice(temperatures);
        self
    }

    /// Append `suffix` to the reply at `temperature`
    pub fn with_suffix(mut self, temperature: f64, suffix: &str) -> Self {
        self.reply_suffix.push((temperature, suffix.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[async_trait]
impl CompletionClient for TemperatureClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionEnvelope, CompletionError> {
        let temperature = request.temperature.unwrap_or_default();
        self.requests.lock().unwrap().push(request);

        if self.failing.iter().any(|t| same(*t, temperature)) {
            return Err(CompletionError::ServerError(503, "overloaded".to_string()));
        }
        let suffix = self
            .reply_suffix
            .iter()
            .find(|(t, _)| same(*t, temperature))
            .map(|(_, s)| s.as_str())
            .unwrap_or_default();
        Ok(CompletionEnvelope::from_text(format!(
            "roast at {temperature:.2}{suffix}"
        )))
    }
}

/// Completion client that always replies with the same text
pub struct FixedClient {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FixedClient {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FixedClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionEnvelope, CompletionError> {
        self.requests.lock().unwrap().push(request);
        Ok(CompletionEnvelope::from_text(self.reply.clone()))
    }
}

/// Completion client whose every call fails
pub struct DownClient;

#[async_trait]
impl CompletionClient for DownClient {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionEnvelope, CompletionError> {
        Err(CompletionError::Network("connection refused".to_string()))
    }
}
