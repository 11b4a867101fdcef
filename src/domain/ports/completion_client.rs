//! Completion service port

use async_trait::async_trait;

use crate::domain::errors::CompletionError;
use crate::domain::models::{CompletionEnvelope, CompletionRequest};

/// Stateless request/response access to a text-generation endpoint
///
/// One call per request; implementations do not retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and return the parsed envelope
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionEnvelope, CompletionError>;

    /// Send one request and extract the first choice's text.
    ///
    /// An envelope without usable text is an `EmptyResponse` error.
    async fn complete_text(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.complete(request)
            .await?
            .first_text()
            .ok_or(CompletionError::EmptyResponse)
    }
}
