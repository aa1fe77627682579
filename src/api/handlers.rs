use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::note::{AssembledNote, ReviewSet};
use crate::publish::PublishRequest;
use crate::service::{NoteRequest, ReviewRequest, Services};
use crate::TARGET_WEB_REQUEST;

/// Decodes a JSON body, treating an empty body as `{}`.
pub fn parse_body<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid JSON body: {}", e)))
}

fn log_failure(route: &str, err: AppError) -> AppError {
    error!(target: TARGET_WEB_REQUEST, "{} failed: {}", route, err);
    err
}

/// POST /api/generate
pub async fn generate_note(
    State(services): State<Services>,
    body: Bytes,
) -> Result<Json<AssembledNote>> {
    let request: NoteRequest = parse_body(&body)?;
    info!(target: TARGET_WEB_REQUEST, "POST /api/generate scene={}", request.scene);

    services
        .generate_note(&request)
        .await
        .map(Json)
        .map_err(|e| log_failure("/api/generate", e))
}

/// POST /api/reviews/generate
pub async fn generate_reviews(
    State(services): State<Services>,
    body: Bytes,
) -> Result<Json<ReviewSet>> {
    let request: ReviewRequest = parse_body(&body)?;
    info!(target: TARGET_WEB_REQUEST, "POST /api/reviews/generate category={}", request.category);

    services
        .generate_reviews(&request)
        .await
        .map(Json)
        .map_err(|e| log_failure("/api/reviews/generate", e))
}

/// POST /api/xhs/publish
pub async fn publish_note(
    State(services): State<Services>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>)> {
    let request: PublishRequest = parse_body(&body)?;
    info!(target: TARGET_WEB_REQUEST, "POST /api/xhs/publish");

    services
        .publish_note(request)
        .await
        .map(|data| (StatusCode::CREATED, Json(data)))
        .map_err(|e| log_failure("/api/xhs/publish", e))
}
