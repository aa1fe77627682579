use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::environment::{AppConfig, XHS_API_KEY_VAR};
use crate::error::{AppError, Result};
use crate::TARGET_WEB_REQUEST;

/// Publish request as received from the caller. Every field is optional on
/// the wire; [`PublishRequest::into_payload`] enforces what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    pub note_id: Option<String>,
}

/// Body forwarded to the publishing API. Blank optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub cover_image: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
}

impl PublishRequest {
    /// Validates the request and trims it into the outbound payload.
    pub fn into_payload(self) -> Result<PublishPayload> {
        let title = trimmed(self.title);
        let content = trimmed(self.content);
        if title.is_none() && content.is_none() {
            return Err(AppError::InvalidRequest(
                "title or content is required".to_string(),
            ));
        }
        let cover_image = trimmed(self.cover_image)
            .ok_or_else(|| AppError::InvalidRequest("coverImage is required".to_string()))?;

        Ok(PublishPayload {
            title,
            content,
            cover_image,
            images: string_list(self.images),
            tags: string_list(self.tags),
            note_id: trimmed(self.note_id),
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Non-arrays become empty; non-string and blank entries are dropped.
fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Relays finished notes to the note-publishing API.
#[derive(Clone, Debug)]
pub struct PublishClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PublishClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            endpoint: config.publish_endpoint.clone(),
            api_key: config.xhs_api_key.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fails with `MissingCredential` when no key is configured.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(AppError::MissingCredential(XHS_API_KEY_VAR))
    }

    /// Posts the payload once and returns the upstream JSON (`{}` for an empty body).
    pub async fn publish(&self, payload: &PublishPayload) -> Result<Value> {
        let api_key = self.api_key()?;

        info!(target: TARGET_WEB_REQUEST, "Publishing note to {} (title: {:?})", self.endpoint, payload.title);

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-API-Key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(target: TARGET_WEB_REQUEST, "Publish request failed: {}", e);
                AppError::Publish(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(target: TARGET_WEB_REQUEST, "Failed to read publish response: {}", e);
            AppError::Publish(e.to_string())
        })?;

        if !status.is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Publish API returned {}: {}", status, text);
            let body = if text.is_empty() {
                "xhs publish api error".to_string()
            } else {
                text
            };
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        if text.is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text).map_err(|e| {
            error!(target: TARGET_WEB_REQUEST, "Publish API returned invalid JSON: {}", e);
            AppError::Publish(e.to_string())
        })
    }
}
