use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input problem. The message is returned to the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// The completion service failed. `verbose` mirrors the debug posture of
    /// the server and controls whether the detail reaches the caller.
    #[error("External service error: {source}")]
    ExternalService {
        #[source]
        source: LlmError,
        verbose: bool,
    },
}

impl AppError {
    pub fn external(source: LlmError, verbose: bool) -> Self {
        AppError::ExternalService { source, verbose }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::ExternalService { source, verbose } => {
                tracing::error!("External service error: {source}");
                let body = if verbose {
                    json!({
                        "error": "Internal Server Error",
                        "detail": source.to_string(),
                    })
                } else {
                    json!({ "error": "Internal Server Error" })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
