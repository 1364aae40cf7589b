//! Error types for the IVR Gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::provider::ProviderError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// IVR Gateway error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Validation(message) => {
                tracing::warn!(error = %message, "Request rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "error": message })),
                )
                    .into_response()
            }
            Error::Provider(err) => {
                tracing::error!(error = %err, "Call placement failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to initiate call",
                        "message": err.to_string(),
                    })),
                )
                    .into_response()
            }
            Error::Internal(message) => {
                tracing::error!(error = %message, "Unhandled failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "message": message,
                    })),
                )
                    .into_response()
            }
        }
    }
}
