//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::ValidationError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more input fields failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Invalid credentials (wrong password or unknown email). One error
    /// for both, so callers cannot probe which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Username or email already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}
