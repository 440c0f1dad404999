use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::llm_client::GatewayError;

/// Application-level error type shared by the workflows and both transport adapters.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing user input. The operation was not attempted.
    #[error("{0}")]
    Validation(String),

    #[error("Could not extract text from {name}: {source}")]
    Extraction {
        name: String,
        #[source]
        source: ExtractionError,
    },

    #[error("LLM request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Extraction { .. } => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed request bodies are validation failures with the usual `{error}` body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Extraction { name, source } => {
                tracing::warn!("Extraction failed for {name}: {source}")
            }
            AppError::Gateway(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::validation("Enter a question");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Enter a question");
    }

    #[test]
    fn test_extraction_names_the_file() {
        let err = AppError::Extraction {
            name: "cv.pdf".to_string(),
            source: ExtractionError::Pdf("bad xref".to_string()),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("cv.pdf"));
        assert!(err.to_string().contains("bad xref"));
    }

    #[test]
    fn test_gateway_is_internal_error() {
        let err = AppError::from(GatewayError::EmptyContent);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("LLM request failed"));
    }
}
