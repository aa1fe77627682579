use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Every failure a request flow can end in.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required API key is not configured.
    #[error("Server missing {0}")]
    MissingCredential(&'static str),

    /// The caller's payload was rejected before any outbound call.
    #[error("{0}")]
    InvalidRequest(String),

    /// An upstream API answered with a non-success status; relayed as-is.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("AI returned empty content")]
    EmptyContent,

    #[error("AI returned empty reviews")]
    EmptyReviews,

    /// Transport or decoding failure talking to the generator.
    #[error("AI service failed: {0}")]
    Generator(String),

    /// Transport or decoding failure talking to the publishing API.
    #[error("xhs publish failed: {0}")]
    Publish(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::EmptyContent | AppError::EmptyReviews => StatusCode::BAD_GATEWAY,
            AppError::Generator(_) | AppError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::MissingCredential(_) | AppError::InvalidRequest(_) => {
                (status, Json(json!({ "error": self.to_string() }))).into_response()
            }
            AppError::Upstream { body, .. } => (status, body).into_response(),
            // Transport details stay in the logs.
            AppError::Generator(_) => (status, "AI service failed").into_response(),
            AppError::Publish(_) => (status, "xhs publish failed").into_response(),
            AppError::EmptyContent | AppError::EmptyReviews => {
                (status, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingCredential("AI_API_KEY").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InvalidRequest("coverImage is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream { status: 429, body: "slow down".into() }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AppError::EmptyReviews.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Generator("connection reset".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_upstream_status_becomes_bad_gateway() {
        assert_eq!(
            AppError::Upstream { status: 42, body: String::new() }.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::MissingCredential("XHS_API_KEY").to_string(),
            "Server missing XHS_API_KEY"
        );
        assert_eq!(AppError::EmptyContent.to_string(), "AI returned empty content");
    }
}
