//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::backend::{Backend, BackendError, GenerateRequest, GenerateResponse, HealthResponse};
use crate::core::state::App;

/// A canned backend for tests that don't need real HTTP.
pub struct ScriptedBackend {
    pub health_status: Option<String>,
    pub reply: Mutex<Option<Result<String, u16>>>,
    pub generate_calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl ScriptedBackend {
    /// Healthy backend that answers every prompt with `reply`.
    pub fn answering(reply: &str) -> Self {
        Self {
            health_status: Some("ok".to_string()),
            reply: Mutex::new(Some(Ok(reply.to_string()))),
            generate_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Healthy backend whose `/generate` fails with `status`.
    pub fn failing(status: u16) -> Self {
        let backend = Self::answering("");
        *backend.reply.lock().unwrap() = Some(Err(status));
        backend
    }

    /// Backend that cannot be reached at all.
    pub fn unreachable() -> Self {
        Self {
            health_status: None,
            reply: Mutex::new(None),
            generate_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn base_url(&self) -> &str {
        "scripted://backend"
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        match &self.health_status {
            Some(status) => Ok(HealthResponse {
                status: status.clone(),
                model: Some("scripted-model".to_string()),
            }),
            None => Err(BackendError::Network("connection refused".to_string())),
        }
    }

    async fn generate(&self, request: GenerateRequest<'_>) -> Result<GenerateResponse, BackendError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.to_string());
        match self.reply.lock().unwrap().clone() {
            Some(Ok(response)) => Ok(GenerateResponse { response }),
            Some(Err(status)) => Err(BackendError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Err(BackendError::Network("connection refused".to_string())),
        }
    }
}

/// A fresh, offline App.
pub fn test_app() -> App {
    App::new("Zoid".to_string())
}

/// A fresh App whose backend has already reported healthy.
pub fn online_app() -> App {
    let mut app = test_app();
    app.is_online = true;
    app
}
