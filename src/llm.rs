use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::environment::{AppConfig, AI_API_KEY_VAR};
use crate::error::{AppError, Result};
use crate::prompt::PromptSpec;
use crate::TARGET_LLM_REQUEST;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }
}

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Each call is a single attempt; there is no retry or backoff.
#[derive(Clone, Debug)]
pub struct GeneratorClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeneratorClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            endpoint: config.ai_endpoint.clone(),
            model: config.ai_model.clone(),
            api_key: config.ai_api_key.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one chat completion and returns the trimmed text of the first choice.
    pub async fn generate(&self, spec: &PromptSpec) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingCredential(AI_API_KEY_VAR))?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: spec.system,
                },
                ChatMessage {
                    role: "user",
                    content: &spec.user,
                },
            ],
            temperature: spec.temperature,
            max_tokens: spec.max_tokens,
            presence_penalty: spec.presence_penalty,
        };

        debug!(target: TARGET_LLM_REQUEST, "Sending chat completion to {} with model {}: {}", self.endpoint, self.model, spec.user);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(target: TARGET_LLM_REQUEST, "Chat completion request failed: {}", e);
                AppError::Generator(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(target: TARGET_LLM_REQUEST, "Generator returned {}: {}", status, text);
            let body = if text.is_empty() {
                format!("AI service error ({})", status.as_u16())
            } else {
                text
            };
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(target: TARGET_LLM_REQUEST, "Failed to decode chat completion: {}", e);
            AppError::Generator(e.to_string())
        })?;

        match completion.first_content() {
            Some(content) => {
                debug!(target: TARGET_LLM_REQUEST, "Generator response received: {}", content);
                Ok(content)
            }
            None => {
                warn!(target: TARGET_LLM_REQUEST, "Generator returned no content");
                Err(AppError::EmptyContent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "Qwen/QwQ-32B",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.9,
            max_tokens: 520,
            presence_penalty: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "Qwen/QwQ-32B");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 520);
    }

    #[test]
    fn test_first_content_trims() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  hello \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content().as_deref(), Some("hello"));
    }

    #[test]
    fn test_first_content_missing_or_blank() {
        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(blank.first_content().is_none());

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(empty.first_content().is_none());

        let null_message: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":null}]}"#).unwrap();
        assert!(null_message.first_content().is_none());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let config = AppConfig::from_lookup(|var| match var {
            "AI_ENDPOINT" => Some("http://127.0.0.1:9/unreachable".to_string()),
            _ => None,
        });
        let client = GeneratorClient::new(Client::new(), &config);
        assert!(!client.has_api_key());
        let spec = crate::prompt::note_prompt_spec("通用", "#示例");
        let err = client.generate(&spec).await.unwrap_err();
        assert!(matches!(err, AppError::MissingCredential("AI_API_KEY")));
    }
}
