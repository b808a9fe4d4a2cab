//! Error responses shared by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use match_core::ValidationIssues;
use serde_json::json;
use thiserror::Error;

use crate::repo::RepoError;

/// Everything a handler can fail with.
///
/// Validation failures carry their issues to the client. Store failures are
/// logged here, once, and the client only sees the generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid query.")]
    InvalidQuery(ValidationIssues),

    #[error("Invalid payload.")]
    InvalidPayload(ValidationIssues),

    #[error("Failed to fetch matches.")]
    FetchFailed(#[source] RepoError),

    #[error("Failed to create a match.")]
    CreateFailed(#[source] RepoError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::FetchFailed(_) | ApiError::CreateFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidQuery(issues) | ApiError::InvalidPayload(issues) => {
                tracing::debug!(%issues, "{}", self);
                json!({ "error": self.to_string(), "details": issues })
            }
            ApiError::FetchFailed(source) | ApiError::CreateFailed(source) => {
                tracing::error!(error = %source, "{}", self);
                json!({ "error": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
