use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::upstream::UpstreamError;

/// Errors surfaced by the HTTP API.
///
/// The ordering core never fails on its own; these cover request validation,
/// the settings database and the media server behind the dashboard.
#[derive(Debug)]
pub enum AppError {
    /// For internal server errors that are not expected to be handled by the client.
    Internal(anyhow::Error),
    NotFound(String),
    ServiceUnavailable(String),
    /// For errors from the settings database.
    Database(String),
    /// The media server rejected or failed a request.
    Upstream(String),
    /// For when a specific field in a request fails validation.
    ValidationError {
        field: String,
        message: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Upstream(msg) => write!(f, "Media server error: {}", msg),
            AppError::ValidationError { field, message } => {
                write!(f, "Validation error on field '{}': {}", field, message)
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, details) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg, None)
            }
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    Some(json!({ "details": msg })),
                )
            }
            AppError::Upstream(msg) => {
                tracing::warn!("Media server error: {}", msg);
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg, None)
            }
            AppError::ValidationError { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Validation failed for field '{}'", field),
                Some(json!({ "field": field, "message": message })),
            ),
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(details) = details {
            body["error"]["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Settings writes surface as anyhow; keep their database classification
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => db_err.into(),
            Err(other) => AppError::Internal(other),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => AppError::Database(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => {
                AppError::ServiceUnavailable("Database connection pool timed out".to_string())
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Request validation helpers.
pub mod validation {
    use super::*;

    /// A library name must be non-empty, trimmed and free of control characters.
    pub fn validate_library_name(name: &str, field: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: "Library name cannot be empty".to_string(),
            });
        }
        if name.trim() != name {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: "Library name has leading or trailing whitespace".to_string(),
            });
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: "Library name contains control characters".to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_library_paths(paths: &[String]) -> AppResult<()> {
        for path in paths {
            if path.is_empty() || path.contains('\0') {
                return Err(AppError::ValidationError {
                    field: "paths".to_string(),
                    message: format!("Invalid library path: {:?}", path),
                });
            }
        }
        Ok(())
    }
}
