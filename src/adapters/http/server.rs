//! Shame HTTP server.
//!
//! JSON endpoints for DragonFire, Longclaw and the individual chaos
//! agents. Every `/api/*` route accepts `POST`, answers `OPTIONS`
//! preflights, and rejects other methods with 405.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::application::ShameServices;
use crate::domain::errors::SwarmError;
use crate::domain::models::{ChaosInput, ChaosKind, Config, ServerConfig};
use crate::services::{DragonFireReport, DragonFireRequest};

const DRAGON_ATE_THE_SERVER: &str = "Dragon ate the server. Try /shame?mode=gentle";
const CORS_MAX_AGE: &str = "86400";

/// Error response body
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Short error message
    pub error: String,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Severity hint sent with DragonFire failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_level: Option<String>,
    /// Underlying error text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, body: ErrorResponse) -> ApiError {
    (status, Json(body))
}

/// Body of `POST /api/longclaw` and `POST /api/agents/{name}`
#[derive(Debug, Deserialize)]
pub struct ChaosRequest {
    /// Chaos text to roast
    #[serde(default)]
    pub input: Option<String>,
    /// Explicit category, skipping keyword detection
    #[serde(default, rename = "type")]
    pub kind: Option<ChaosKind>,
}

/// What the API serves
///
/// The server still starts without an API key; every API call then fails
/// with the configuration error.
#[derive(Clone)]
pub enum Backend {
    /// Services wired to a completion client
    Ready(ShameServices),
    /// No client; the reason is returned by every API call
    Unconfigured(String),
}

type AppState = Arc<Backend>;

impl Backend {
    /// Ready when the completion client can be built, unconfigured otherwise
    pub fn from_config(config: &Config) -> Self {
        match ShameServices::from_config(config) {
            Ok(services) => Self::Ready(services),
            Err(err) => {
                warn!(error = %err, "serving without a completion client");
                Self::Unconfigured(err.to_string())
            }
        }
    }

    fn services(&self) -> Result<&ShameServices, ApiError> {
        match self {
            Self::Ready(services) => Ok(services),
            Self::Unconfigured(reason) => Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(reason.clone()),
            )),
        }
    }
}

/// Shame HTTP server
pub struct ShameHttpServer {
    config: ServerConfig,
    backend: Backend,
}

impl ShameHttpServer {
    /// Server for `backend`, bound per `config`
    pub fn new(backend: Backend, config: ServerConfig) -> Self {
        Self { config, backend }
    }

    /// Build the router
    pub fn build_router(self) -> Router {
        let state: AppState = Arc::new(self.backend);

        let api = Router::new()
            .route(
                "/api/dragonfire",
                post(dragonfire)
                    .options(preflight)
                    .fallback(method_not_allowed),
            )
            .route(
                "/api/longclaw",
                post(longclaw).options(preflight).fallback(method_not_allowed),
            )
            .route(
                "/api/agents/{name}",
                post(run_agent).options(preflight).fallback(method_not_allowed),
            )
            .with_state(state);

        let api = if self.config.enable_cors {
            api.layer(map_response(add_cors_headers))
        } else {
            api
        };

        Router::new()
            .route("/health", get(health_check))
            .merge(api)
            .layer(TraceLayer::new_for_http())
    }

    fn addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Start the server
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        tracing::info!("Shame HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::ACCESS_CONTROL_MAX_AGE, CORS_MAX_AGE)],
    )
}

async fn method_not_allowed() -> ApiError {
    api_error(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorResponse::new("Method not allowed. Use POST."),
    )
}

async fn dragonfire(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DragonFireReport>, ApiError> {
    let services = state.services()?;
    let request = DragonFireRequest::from_slice(&body);

    services.dragonfire.ignite(&request).await.map(Json).map_err(|err| {
        error!(error = %err, "DragonFire failed");
        match err {
            SwarmError::Configuration(reason) => api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(reason),
            ),
            other => api_error(
                StatusCode::IM_A_TEAPOT,
                ErrorResponse {
                    error: DRAGON_ATE_THE_SERVER.to_string(),
                    fire_level: Some("low".to_string()),
                    detail: Some(other.to_string()),
                    ..ErrorResponse::default()
                },
            ),
        }
    })
}

fn parse_chaos(body: &[u8]) -> Result<ChaosRequest, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "rejecting unparseable chaos body");
        api_error(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid JSON body"),
        )
    })
}

async fn longclaw(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let services = state.services()?;
    let request = parse_chaos(&body)?;
    let input = request.input.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Missing input for Longclaw orchestrator."),
        ));
    }

    let chaos = ChaosInput {
        input: input.to_string(),
        kind: request.kind,
    };
    match services.longclaw.execute(&chaos).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(err) => {
            error!(error = %err, "Longclaw failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(err.to_string()),
            ))
        }
    }
}

async fn run_agent(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let services = state.services()?;
    let agent = services.longclaw.agents().by_name(&name).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("Unknown agent: {name}")),
        )
    })?;

    let request = parse_chaos(&body)?;
    let input = match request.input {
        Some(input) if !input.trim().is_empty() => input,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing input"),
            ))
        }
    };

    match agent.execute(&ChaosInput::new(input)).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(err) => {
            error!(agent = %name, error = %err, "agent failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal Error".to_string(),
                    message: Some(err.to_string()),
                    ..ErrorResponse::default()
                },
            ))
        }
    }
}
