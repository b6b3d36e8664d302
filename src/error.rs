//! Application error taxonomy and its HTTP representation.
//!
//! Every failure of the core is returned to the caller as an [`AppError`]
//! variant that is specific enough to pick a user-facing message:
//!
//! - [`AppError::Validation`] - the long URL is not a valid absolute URL
//! - [`AppError::Duplicate`] - a uniqueness constraint rejected the insert
//! - [`AppError::Persistence`] - any other storage fault
//! - [`AppError::NotFound`] - no mapping exists for a short code
//! - [`AppError::Entropy`] - the secure random source failed

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned by the HTTP layer.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Which uniqueness constraint a duplicate insert violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    /// The generated short code is already taken.
    ShortCode,
    /// The long URL has already been shortened.
    LongUrl,
    /// The store reported a duplicate without a recognizable constraint.
    Unknown,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Duplicate {
        kind: DuplicateKind,
        message: String,
        details: Value,
    },
    #[error("{message}")]
    Persistence { message: String, details: Value },
    #[error("{message}")]
    Entropy { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate(kind: DuplicateKind, message: impl Into<String>, details: Value) -> Self {
        Self::Duplicate {
            kind,
            message: message.into(),
            details,
        }
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }

    pub fn entropy(message: impl Into<String>, details: Value) -> Self {
        Self::Entropy {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Duplicate { .. } => "duplicate",
            AppError::Persistence { .. } => "persistence_error",
            AppError::Entropy { .. } => "entropy_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Persistence { .. } | AppError::Entropy { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Duplicate {
                message, details, ..
            }
            | AppError::Persistence { message, details }
            | AppError::Entropy { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!({ "fields": e.to_string() }))
    }
}

/// Lookups and health checks surface every driver error as a persistence fault.
///
/// Inserts go through [`crate::utils::db_error::classify`] instead so that
/// duplicate keys are reported distinctly.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::persistence("Database error", json!({ "reason": e.to_string() }))
    }
}
