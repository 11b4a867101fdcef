//! Domain errors for the Shame service.

use thiserror::Error;

/// Failure of a single call to the completion service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No API key in config or environment
    #[error("Missing OPENROUTER_API_KEY for the completion service")]
    MissingApiKey,

    /// Client could not be constructed from the configuration
    #[error("Invalid completion client configuration: {0}")]
    InvalidConfiguration(String),

    /// HTTP 400
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 401 or 403
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// HTTP 429
    #[error("Rate limit exceeded")]
    RateLimited,

    /// HTTP 5xx
    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    /// Any other non-success status
    #[error("Unexpected status ({0}): {1}")]
    UnexpectedStatus(u16, String),

    /// Connection failure before a status was received
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Body could not be parsed as a completion envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Envelope parsed but carried no usable text
    #[error("Empty response from the completion service")]
    EmptyResponse,
}

impl CompletionError {
    /// Map a non-success HTTP status and body to an error variant
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status, body),
            _ => Self::UnexpectedStatus(status, body),
        }
    }

    /// Configuration errors are fatal before any call is attempted
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidConfiguration(_))
    }
}

/// Failure of a whole swarm run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwarmError {
    /// Required configuration missing; nothing was dispatched
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prompt was empty
    #[error("Swarm prompt cannot be empty")]
    InvalidPrompt,

    /// More members requested than one run may dispatch; nothing was dispatched
    #[error("Swarm size {requested} exceeds the maximum of {max}")]
    TooLarge {
        /// Requested member count
        requested: usize,
        /// Largest allowed member count
        max: usize,
    },

    /// Every dispatched member failed or was malformed
    #[error("No surviving roasts from the DragonFire swarm ({dispatched} requests failed)")]
    TotalFailure {
        /// Members dispatched, all of which failed
        dispatched: usize,
    },
}

/// Failure of a chaos agent or the orchestrator
#[derive(Debug, Error)]
pub enum AgentError {
    /// Completion call failed or returned no text
    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),

    /// Result could not be encoded for the cache
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a record source lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSourceError {
    /// Source could not be queried
    #[error("Record source unavailable: {0}")]
    Unavailable(String),
}
