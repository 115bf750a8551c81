//! Error types shared by the HTTP layer and the stores behind it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Why a bearer token was not accepted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No `Authorization` value on the request
    #[error("Access Denied: No Token Provided")]
    Missing,

    /// Bad signature, malformed structure, or wrong issuer/audience
    #[error("Invalid Token")]
    Invalid,

    /// Signature is fine but `exp` has passed
    #[error("Token expired")]
    Expired,
}

/// Credential store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error returned by handlers; renders as `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Same message for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Only `context` reaches the client; `cause` is logged.
    #[error("{context}")]
    Internal {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(context: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            context,
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials
            | ApiError::Unauthorized(_)
            | ApiError::Token(TokenError::Missing) => StatusCode::UNAUTHORIZED,
            ApiError::Token(_) | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Emits the server-side log line for internal failures.
    pub fn log(&self) {
        if let ApiError::Internal { context, cause } = self {
            error!(error = ?cause, context = *context, "request failed");
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Conflict("Email already exists".into()),
            StoreError::Database(e) => ApiError::internal("Database error", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
