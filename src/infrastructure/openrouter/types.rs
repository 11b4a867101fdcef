//! Wire types for the OpenRouter chat-completions endpoint

use serde::Serialize;

use crate::domain::models::{ChatMessage, CompletionRequest};

/// Request body for `POST /chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation to complete
    pub messages: &'a [ChatMessage],
    /// Always false; responses are read whole
    pub stream: bool,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Token limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}
