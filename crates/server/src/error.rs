//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every failure to a JSON
//! response. All route handlers return `Result<T, AppError>`. Internal
//! detail is logged server-side and never reaches the client.

use core::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::lists::ListError;
use crate::services::token::TokenError;

/// A single violated field in a validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Name of the request field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Validation failure listing every violated field, not just the first.
#[derive(Debug, Clone, Default)]
pub struct ValidationError {
    /// All violations, in field order.
    pub errors: Vec<FieldError>,
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Create an empty collection of violations.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a violation for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether no violation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed:")?;
        for err in &self.errors {
            write!(f, " {}: {};", err.field, err.message)?;
        }
        Ok(())
    }
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request fields failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// List or product operation failed.
    #[error("list error: {0}")]
    List(#[from] ListError),

    /// Token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Body for validation failures: `{"errors": [{"field", "message"}]}`.
#[derive(Serialize)]
struct ErrorsBody {
    errors: Vec<FieldError>,
}

/// Body for every other failure: `{"message": "..."}`.
#[derive(Serialize)]
struct MessageBody {
    message: String,
}

impl AppError {
    /// The validation payload, if this error carries one.
    fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v)
            | Self::Auth(AuthError::Validation(v))
            | Self::List(ListError::Validation(v)) => Some(v),
            _ => None,
        }
    }

    /// Whether the failure is server-side and should be logged in full.
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Token(TokenError::Sign)
                | Self::Auth(AuthError::PasswordHash | AuthError::Repository(_))
                | Self::List(ListError::Repository(_) | ListError::Storage(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        if let Some(validation) = self.validation() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorsBody {
                    errors: validation.errors.clone(),
                }),
            )
                .into_response();
        }

        let (status, message) = match &self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".to_owned())
                }
                AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "User not found".to_owned()),
                AuthError::UserAlreadyExists => (
                    StatusCode::BAD_REQUEST,
                    "User already exists with this email or username".to_owned(),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned()),
            },
            Self::List(err) => match err {
                ListError::NotFound => {
                    (StatusCode::NOT_FOUND, "Shopping list not found".to_owned())
                }
                ListError::ProductNotFound => {
                    (StatusCode::NOT_FOUND, "Product not found".to_owned())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned()),
            },
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_owned()),
            Self::Token(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned())
            }
        };

        (status, Json(MessageBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
