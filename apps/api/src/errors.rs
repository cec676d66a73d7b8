use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::guidance::GuidanceError;
use crate::pipeline::PipelineError;
use crate::resume::extractor::ExtractError;

/// Longest slice of raw model output written to the log for diagnostics.
const RAW_LOG_LIMIT: usize = 2000;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Could not read document: {0}")]
    DocumentRead(String),

    #[error("Document contains no readable text")]
    EmptyDocument,

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Output format error")]
    OutputFormat { raw: String },

    #[error("Output schema error: {reason}")]
    OutputSchema { reason: String, raw: String },

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Extract(ExtractError::DocumentRead(msg)) => AppError::DocumentRead(msg),
            PipelineError::Extract(ExtractError::EmptyDocument) => AppError::EmptyDocument,
            PipelineError::Guidance(GuidanceError::Generation(e)) => {
                AppError::Generation(e.to_string())
            }
            PipelineError::Guidance(GuidanceError::OutputFormat { raw }) => {
                AppError::OutputFormat { raw }
            }
            PipelineError::Guidance(GuidanceError::OutputSchema { reason, raw }) => {
                AppError::OutputSchema { reason, raw }
            }
            PipelineError::Internal(e) => AppError::Internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::DocumentRead(msg) => {
                tracing::warn!("Document read error: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "DOCUMENT_READ_ERROR",
                    "Could not read the uploaded document. Please upload a valid PDF.".to_string(),
                )
            }
            AppError::EmptyDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                "The uploaded document contains no readable text.".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The text-generation service failed.".to_string(),
                )
            }
            AppError::OutputFormat { raw } => {
                tracing::error!("No JSON object in model output: {}", truncate(raw));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OUTPUT_FORMAT_ERROR",
                    "The AI produced no recognizable structured output.".to_string(),
                )
            }
            AppError::OutputSchema { reason, raw } => {
                tracing::error!("Model output failed validation ({reason}): {}", truncate(raw));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OUTPUT_SCHEMA_ERROR",
                    "The AI output did not match the expected shape.".to_string(),
                )
            }
            AppError::Timeout(secs) => {
                tracing::error!("Request timed out after {secs}s");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "The request took too long to process.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "code": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

fn truncate(raw: &str) -> &str {
    match raw.char_indices().nth(RAW_LOG_LIMIT) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
