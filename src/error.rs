//! Application error type and its HTTP representation.
//!
//! Every failure that reaches the HTTP boundary is rendered as
//! `{"error": "<message>"}`, optionally with a `details` field, and the
//! status code of the variant.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request (empty or unparseable body). Maps to 400.
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    /// Well-formed request with unusable content. Maps to 422.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    /// Request body over the configured limit. Maps to 413.
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// Missing or invalid request signature. Maps to 401.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Storage faults and broken invariants. Details are logged, never sent.
    #[error("{message}: {source}")]
    Internal {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the JSON body sent to clients.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            AppError::BadRequest { message, details }
            | AppError::Validation { message, details } => ErrorBody {
                error: message.clone(),
                details: details.clone(),
            },
            AppError::PayloadTooLarge { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message } => ErrorBody {
                error: message.clone(),
                details: None,
            },
            AppError::Internal { message, .. } => ErrorBody {
                error: message.clone(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }

        (self.status(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::internal("Database migration failed", e)
    }
}
