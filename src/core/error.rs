//! Typed error handling for the read path and the HTTP boundary
//!
//! Validation and persistence failures on the mutation path are recoverable
//! and travel as [`FormState`](crate::core::form::FormState) values, never as
//! errors. This module covers everything else:
//!
//! - [`AppError::NotFound`]: a lookup yielded no record; takes precedence
//!   over generic error display and maps to 404
//! - [`AppError::Storage`]: the store rejected a read; the cause is logged,
//!   not exposed
//! - [`AppError::Internal`]: anything that should not happen in normal
//!   operation

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The error type surfaced by page handlers.
#[derive(Debug)]
pub enum AppError {
    /// A lookup yielded no record
    NotFound { resource: &'static str, id: Uuid },

    /// The store rejected a read operation
    Storage { message: String },

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            AppError::Storage { message } => write!(f, "Storage error: {}", message),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::NotFound { resource, id } => Some(serde_json::json!({
                "resource": resource,
                "id": id.to_string()
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { message } = &self {
            tracing::error!(error = %message, "read path failed");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Read-path store errors carry their cause as `anyhow::Error`; recover them
/// into the generic storage variant at the HTTP boundary.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for handler operations
pub type AppResult<T> = Result<T, AppError>;
