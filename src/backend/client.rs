use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{GenerateRequest, GenerateResponse, HealthResponse};
use crate::core::health::HealthReport;

/// Errors that can occur while talking to the backend.
#[derive(Debug)]
pub enum BackendError {
    /// Client could not be constructed (bad TLS setup, invalid settings).
    Config(String),
    /// Network-level failure (DNS, connection refused, timeout).
    Network(String),
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The two endpoints Zoid consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL requests are resolved against (no trailing slash).
    fn base_url(&self) -> &str;

    /// `GET /health`.
    async fn health(&self) -> Result<HealthResponse, BackendError>;

    /// `POST /generate`.
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<GenerateResponse, BackendError>;
}

/// Run one health probe and collapse every failure into "offline".
pub async fn probe(backend: &dyn Backend) -> HealthReport {
    match backend.health().await {
        Ok(response) => {
            debug!("Health payload: {:?}", response);
            HealthReport::from(response)
        }
        Err(e) => {
            debug!("Health probe against {} failed: {}", backend.base_url(), e);
            HealthReport::offline()
        }
    }
}

/// reqwest-backed implementation.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// `timeout = None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("HTTP backend at {} (timeout: {:?})", base_url, timeout);
        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        // The body alone decides liveness, whatever the status line says.
        debug!("Health status line: {}", response.status());
        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn generate(&self, request: GenerateRequest<'_>) -> Result<GenerateResponse, BackendError> {
        info!(
            "Generate request: prompt_len={}, mode={:?}, max_new_tokens={:?}",
            request.prompt.len(),
            request.mode,
            request.max_new_tokens
        );

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("Generate response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status, err_body);
            return Err(BackendError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
