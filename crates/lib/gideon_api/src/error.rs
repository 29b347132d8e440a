//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gideon_core::gemini::GeminiError;
use serde::Serialize;
use thiserror::Error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] GeminiError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Upstream(e) => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                upstream_message(e),
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

/// Client-facing summary; upstream bodies and details stay in the logs.
fn upstream_message(e: &GeminiError) -> &'static str {
    match e {
        GeminiError::Endpoint(_) => "Upstream endpoint is misconfigured",
        GeminiError::Transport(_) => "Upstream request failed",
        GeminiError::Status { .. } => "Upstream returned an error status",
        GeminiError::Decode(_) => "Upstream response could not be decoded",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_maps_to_bad_gateway() {
        let err = AppError::from(GeminiError::Status {
            status: 500,
            body: "boom".into(),
        });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
