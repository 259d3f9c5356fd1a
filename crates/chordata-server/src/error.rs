use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use chordata_inspect::InspectError;

/// Body served for any path or asset that does not exist.
pub const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\"><title>Not Found</title></head>\n<body><h1>404 Not Found</h1><p>The requested resource is not available.</p></body></html>\n";

/// Error message returned when a snapshot cannot be encoded.
pub const ENCODE_FAILURE: &str = "Failed to encode models data";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("encoding error: {0}")]
    Encode(String),

    #[error("inspection error: {0}")]
    Inspect(#[from] InspectError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::AssetNotFound(name) => {
                tracing::debug!(asset = %name, "asset not found");
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            Self::Encode(reason) => {
                tracing::error!(fault = "encode", %reason, "failed to encode snapshot");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": ENCODE_FAILURE })),
                )
                    .into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
