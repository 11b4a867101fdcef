//! OpenRouter chat-completions client

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::types::ChatCompletionBody;
use crate::domain::errors::CompletionError;
use crate::domain::models::{CompletionConfig, CompletionEnvelope, CompletionRequest};
use crate::domain::ports::CompletionClient;
use crate::infrastructure::logging::mask_key;

/// Environment variables consulted, in order, when no key is configured
pub const API_KEY_VARS: [&str; 2] = ["OPENROUTER_API_KEY", "VITE_OPENROUTER_API_KEY"];

/// Configuration for the OpenRouter HTTP client
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// Bearer key
    pub api_key: String,
    /// API root, e.g. `https://openrouter.ai/api/v1`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// `HTTP-Referer` header value
    pub referer: String,
    /// `X-Title` header value
    pub title: String,
}

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

impl OpenRouterConfig {
    /// Build from settings, reading the key from the process environment
    /// when none is configured
    pub fn from_settings(settings: &CompletionConfig) -> Result<Self, CompletionError> {
        Self::from_settings_with(settings, |name| std::env::var(name).ok())
    }

    /// Same as [`from_settings`](Self::from_settings) with an explicit
    /// environment lookup
    pub fn from_settings_with(
        settings: &CompletionConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CompletionError> {
        let api_key = resolve_api_key(settings.api_key.as_deref(), lookup)
            .ok_or(CompletionError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout_secs: settings.timeout_secs,
            referer: settings.referer.clone(),
            title: settings.title.clone(),
        })
    }
}

/// First non-blank key among the configured value and [`API_KEY_VARS`]
pub fn resolve_api_key(
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .map(str::to_string)
        .into_iter()
        .chain(API_KEY_VARS.iter().filter_map(|name| lookup(name)))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// HTTP client for the OpenRouter chat-completions API
///
/// One request per call with no retries; connections are pooled.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl OpenRouterClient {
    /// Build the client with its default headers
    ///
    /// # Errors
    /// Fails when a header value is invalid or the HTTP client cannot be built.
    pub fn new(config: OpenRouterConfig) -> Result<Self, CompletionError> {
        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            api_key = %mask_key(&config.api_key),
            "initializing OpenRouter client"
        );

        let header_value = |value: &str, name: &str| {
            header::HeaderValue::from_str(value).map_err(|e| {
                CompletionError::InvalidConfiguration(format!("Invalid {name} header: {e}"))
            })
        };

        let mut auth = header_value(&format!("Bearer {}", config.api_key), "Authorization")?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert("http-referer", header_value(&config.referer, "HTTP-Referer")?);
        headers.insert("x-title", header_value(&config.title, "X-Title")?);

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(64)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(|e| CompletionError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    /// Convenience constructor from settings plus the process environment
    pub fn from_settings(settings: &CompletionConfig) -> Result<Self, CompletionError> {
        Self::new(OpenRouterConfig::from_settings(settings)?)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn handle_response(response: Response) -> Result<CompletionEnvelope, CompletionError> {
        let status = response.status();
        debug!(%status, "completion response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::from_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| CompletionError::MalformedResponse(e.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(err.to_string())
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionEnvelope, CompletionError> {
        let body = ChatCompletionBody::from(&request);
        let response = self
            .http_client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                let err = map_transport_error(err);
                warn!(error = %err, "completion request failed");
                err
            })?;

        Self::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_configured_key_wins() {
        let key = resolve_api_key(Some("sk-config"), env(&[("OPENROUTER_API_KEY", "sk-env")]));
        assert_eq!(key.as_deref(), Some("sk-config"));
    }

    #[test]
    fn test_env_fallback_order() {
        let key = resolve_api_key(
            None,
            env(&[
                ("OPENROUTER_API_KEY", "sk-server"),
                ("VITE_OPENROUTER_API_KEY", "sk-vite"),
            ]),
        );
        assert_eq!(key.as_deref(), Some("sk-server"));

        let key = resolve_api_key(Some("  "), env(&[("VITE_OPENROUTER_API_KEY", "sk-vite")]));
        assert_eq!(key.as_deref(), Some("sk-vite"));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = OpenRouterConfig::from_settings_with(&CompletionConfig::default(), env(&[]))
            .unwrap_err();
        assert_eq!(err, CompletionError::MissingApiKey);
        assert!(err.is_configuration());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let settings = CompletionConfig {
            base_url: "http://localhost:9000/api/v1/".to_string(),
            api_key: Some("sk-test".to_string()),
            ..CompletionConfig::default()
        };
        let client = OpenRouterClient::new(
            OpenRouterConfig::from_settings_with(&settings, env(&[])).unwrap(),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/api/v1/chat/completions");
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let settings = CompletionConfig {
            api_key: Some("sk-bad\nkey".to_string()),
            ..CompletionConfig::default()
        };
        let config = OpenRouterConfig::from_settings_with(&settings, env(&[])).unwrap();
        assert!(matches!(
            OpenRouterClient::new(config),
            Err(CompletionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_debug_masks_key() {
        let config = OpenRouterConfig {
            api_key: "sk-or-v1-abcdefghijklmnop".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout_secs: 120,
            referer: "https://shame.lol".to_string(),
            title: "Shame".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("abcdefghijklmnop"));
    }
}
