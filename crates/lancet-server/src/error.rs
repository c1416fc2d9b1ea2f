//! Error handling for the Lancet server.
//!
//! Core error kinds translate to explicit status codes here; nothing is
//! collapsed into a blanket 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lancet_core::LancetError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Core engine error.
    #[error("Lancet error: {0}")]
    Lancet(#[from] LancetError),

    /// Bad request error.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found error.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Lancet(LancetError::EmptyInput) => StatusCode::BAD_REQUEST,
            ServerError::Lancet(LancetError::ModelLoadError(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Lancet(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Serialization(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable error type string for clients.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Lancet(LancetError::EmptyInput) => "empty_input",
            ServerError::Lancet(LancetError::ModelLoadError(_)) => "model_unavailable",
            ServerError::Lancet(_) => "inference_error",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::Serialization(_) => "serialization_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_maps_to_bad_request() {
        let err = ServerError::from(LancetError::EmptyInput);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "empty_input");
    }

    #[test]
    fn model_load_maps_to_service_unavailable() {
        let err = ServerError::from(LancetError::ModelLoadError("weights missing".into()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_type(), "model_unavailable");
    }

    #[test]
    fn inference_errors_map_to_internal() {
        let err = ServerError::from(LancetError::InferenceError("shape mismatch".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "inference_error");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ServerError::NotFound("examples file".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_type(), "not_found");
    }

    #[test]
    fn error_response_body_shape() {
        let err = ServerError::BadRequest("text is empty".into());
        let body = ErrorResponse {
            error: err.error_type().to_string(),
            message: err.to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "bad_request");
        assert!(json["message"].as_str().unwrap().contains("text is empty"));
    }
}
