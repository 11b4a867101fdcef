//! Configuration model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::swarm::SwarmSize;

/// Main configuration structure for Shame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Completion service configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// DragonFire swarm configuration
    #[serde(default)]
    pub swarm: SwarmConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionConfig {
    /// Base URL of the chat-completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to `OPENROUTER_API_KEY` then `VITE_OPENROUTER_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used by every DragonFire swarm member
    #[serde(default = "default_swarm_model")]
    pub swarm_model: String,

    /// Model used by the chaos agents and the Longclaw fusion call
    #[serde(default = "default_agent_model")]
    pub agent_model: String,

    /// Token limit for agent calls
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value sent as the `HTTP-Referer` header
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value sent as the `X-Title` header
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_swarm_model() -> String {
    "grok-beta".to_string()
}

fn default_agent_model() -> String {
    "anthropic/claude-3.5-sonnet-20241022".to_string()
}

const fn default_max_tokens() -> u32 {
    4096
}

const fn default_timeout_secs() -> u64 {
    120
}

fn default_referer() -> String {
    "https://shame.lol".to_string()
}

fn default_title() -> String {
    "Shame".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            swarm_model: default_swarm_model(),
            agent_model: default_agent_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

/// DragonFire swarm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SwarmConfig {
    /// Members dispatched when the caller gives no usable size
    #[serde(default = "default_swarm_size")]
    pub default_size: usize,

    /// Upper bound on concurrently in-flight members; unset means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_in_flight: Option<usize>,
}

const fn default_swarm_size() -> usize {
    SwarmSize::DEFAULT.get()
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            default_size: default_swarm_size(),
            max_in_flight: None,
        }
    }
}

impl SwarmConfig {
    /// Configured default as a validated swarm size
    pub fn default_swarm_size(&self) -> SwarmSize {
        SwarmSize::new(self.default_size).unwrap_or_default()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to attach CORS headers to API responses
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8663
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
