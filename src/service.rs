//! Request flows shared by the HTTP server and the CLI.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::environment::AppConfig;
use crate::error::{AppError, Result};
use crate::llm::GeneratorClient;
use crate::note::{self, normalize_tags, split_reviews, AssembledNote, NoteAssembler, ReviewSet};
use crate::prompt::{note_prompt_spec, review_prompt_spec, ReviewLength};
use crate::publish::{PublishClient, PublishRequest};

pub const DEFAULT_SCENE: &str = "通用";
pub const DEFAULT_TAGS: &str = "#示例 #标签";
pub const DEFAULT_CATEGORY: &str = "头疗";
pub const DEFAULT_TONE: &str = "真实";
pub const DEFAULT_LENGTH_OPTION: &str = "80-100";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoteRequest {
    pub scene: String,
    pub tags: String,
}

impl Default for NoteRequest {
    fn default() -> Self {
        Self {
            scene: DEFAULT_SCENE.to_string(),
            tags: DEFAULT_TAGS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewRequest {
    pub category: String,
    pub tone: String,
    pub length_option: String,
}

impl Default for ReviewRequest {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            tone: DEFAULT_TONE.to_string(),
            length_option: DEFAULT_LENGTH_OPTION.to_string(),
        }
    }
}

/// Outbound clients, cloned cheaply into every request.
#[derive(Clone, Debug)]
pub struct Services {
    pub generator: GeneratorClient,
    pub publisher: PublishClient,
    pub assembler: NoteAssembler,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Generator(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            generator: GeneratorClient::new(http.clone(), config),
            publisher: PublishClient::new(http, config),
            assembler: NoteAssembler::new(),
        })
    }

    /// Drafts one note for the scene and normalizes it.
    pub async fn generate_note(&self, request: &NoteRequest) -> Result<AssembledNote> {
        let tags_line = normalize_tags(&request.tags);
        info!("Generating note for scene '{}' with tags '{}'", request.scene, tags_line);

        let spec = note_prompt_spec(&request.scene, &tags_line);
        let raw = self.generator.generate(&spec).await?;

        Ok(note::note_from_output(&raw, &tags_line, &self.assembler))
    }

    /// Drafts up to three reviews. An output with no usable segment is an error.
    pub async fn generate_reviews(&self, request: &ReviewRequest) -> Result<ReviewSet> {
        let length = ReviewLength::from_selector(&request.length_option);
        info!(
            "Generating reviews for category '{}' tone '{}' length {:?}",
            request.category, request.tone, length
        );

        let spec = review_prompt_spec(&request.category, &request.tone, length);
        let raw = self.generator.generate(&spec).await?;

        split_reviews(&raw).ok_or(AppError::EmptyReviews)
    }

    /// Validates and relays a note to the publishing API.
    pub async fn publish_note(&self, request: PublishRequest) -> Result<Value> {
        // Credential problems are reported before payload problems.
        self.publisher.api_key()?;
        let payload = request.into_payload()?;
        self.publisher.publish(&payload).await
    }
}
