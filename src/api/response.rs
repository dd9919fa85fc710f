//! Error responses for the status API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// No pass has finished since the service started.
    pub fn no_pass_yet() -> Self {
        Self::new("NO_PASS_YET", "No sync pass has finished yet")
    }

    /// A pass is already running.
    pub fn pass_in_progress() -> Self {
        Self::with_details(
            "PASS_IN_PROGRESS",
            "A sync pass is already running",
            "Retry once the current pass has finished",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with its status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::no_pass_yet();
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"NO_PASS_YET\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::pass_in_progress();
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"PASS_IN_PROGRESS\""));
        assert!(json.contains("\"details\":"));
    }

    #[test]
    fn test_error_response_status() {
        let response =
            ApiErrorResponse::new(StatusCode::CONFLICT, ApiError::pass_in_progress()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
