use serde::{Deserialize, Deserializer, Serialize};

use crate::core::config::GenerateConfig;
use crate::core::health::HealthReport;

/// Body of `GET /health`. Only `status` decides liveness; `model` is informational.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, deserialize_with = "string_or_none")]
    pub model: Option<String>,
}

/// Accept any JSON for an informational field, keeping it only when it is a string.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

/// Only `status == "ok"` counts as online.
impl From<HealthResponse> for HealthReport {
    fn from(response: HealthResponse) -> Self {
        if response.status == "ok" {
            Self {
                online: true,
                model: response.model,
            }
        } else {
            Self::offline()
        }
    }
}

/// Body of `POST /generate`. Everything except `prompt` is omitted unless configured.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            user_id: None,
            mode: None,
            max_new_tokens: None,
        }
    }

    pub fn with_extras(prompt: &'a str, extras: &'a GenerateConfig) -> Self {
        Self {
            prompt,
            user_id: extras.user_id.as_deref(),
            mode: extras.mode.as_deref(),
            max_new_tokens: extras.max_new_tokens,
        }
    }
}

/// Successful body of `POST /generate`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub response: String,
}
