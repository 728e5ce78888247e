//! HTTP error mapping for the webhook endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coordinator::CoordinatorError;
use serde::Serialize;

/// Errors a webhook request can produce, each carrying its HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request: missing headers, invalid JSON, bad payload fields.
    #[error("{0}")]
    BadRequest(String),

    /// Signature verification failed.
    #[error("Invalid signature")]
    Unauthorized,

    /// Event handling failed.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Coordinator(err) => match err {
                CoordinatorError::BadRequest(_) => StatusCode::BAD_REQUEST,
                CoordinatorError::MeetingNotFound(_)
                | CoordinatorError::AgentMissing { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "webhook request failed");
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
