//! Authentication service.
//!
//! Registration and email/password login over the user repository.
//! Passwords are hashed with Argon2id before they reach the store and are
//! verified through the hash algorithm's own compare; plaintext is never
//! persisted or compared.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use shoplist_core::{Email, UserId, Username};

use crate::db::users::{NewUser, UserRepository};
use crate::db::{RepositoryError, Store};
use crate::error::ValidationError;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Handles user registration, login, and identity lookup.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new user.
    ///
    /// All field violations are collected into a single validation error
    /// rather than stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if username, email, or password is
    /// malformed, and `AuthError::UserAlreadyExists` if the username or
    /// email is already registered.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let mut errors = ValidationError::new();

        let username = Username::parse(username)
            .inspect_err(|e| errors.push("username", e.to_string()))
            .ok();
        let email = Email::parse(email)
            .inspect_err(|e| errors.push("email", e.to_string()))
            .ok();
        if password.len() < MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        let (Some(username), Some(email)) = (username, email) else {
            return Err(errors.into());
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let password_hash = hash_password(password)?;

        self.users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown,
    /// malformed, or the password is wrong — the same error in every
    /// case.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some((user, password_hash)) = self.users.get_password_hash(&email).await else {
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await
            .ok_or(AuthError::UserNotFound)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_hashes_and_login_verifies() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        let user = auth
            .register("alice", "Alice@Example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.email.as_str(), "alice@example.com");

        let logged_in = auth.login("alice@example.com", "password123").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn register_collects_every_field_violation() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        let err = auth.register("ab", "not-an-email", "123").await.unwrap_err();
        let AuthError::Validation(validation) = err else {
            panic!("expected validation error");
        };

        let fields: Vec<&str> = validation.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
    }

    #[tokio::test]
    async fn register_twice_is_duplicate_identity() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        auth.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        // Same email, different username.
        let err = auth
            .register("alice2", "alice@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));

        // Same username, different email.
        let err = auth
            .register("alice", "alice2@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        auth.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let wrong_password = auth
            .login("alice@example.com", "wrongpassword")
            .await
            .unwrap_err();
        let unknown_email = auth
            .login("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn get_user_resolves_registered_ids_only() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        let user = auth
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(auth.get_user(user.id).await.unwrap().id, user.id);
        assert!(matches!(
            auth.get_user(UserId::generate()).await.unwrap_err(),
            AuthError::UserNotFound
        ));
    }
}
