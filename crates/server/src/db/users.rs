//! User repository.
//!
//! Uniqueness of username and email is enforced here, at creation time.
//! Normal reads never expose the password hash; login verification uses
//! the dedicated [`UserRepository::get_password_hash`] accessor.

use chrono::Utc;

use shoplist_core::{Email, UserId, Username};

use super::{RepositoryError, Store};
use crate::models::{User, UserRecord};

/// Fields for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Validated username.
    pub username: Username,
    /// Validated, lowercase-normalized email.
    pub email: Email,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
}

/// Repository for user records.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is
    /// already taken. Email uniqueness is case-insensitive by construction,
    /// since [`Email::parse`] lowercases its input.
    pub async fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.store.users().write().await;

        if users.values().any(|r| r.user.username == new.username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        if users.values().any(|r| r.user.email == new.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            username: new.username,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: new.password_hash,
            },
        );

        Ok(user)
    }

    /// Get a user by their ID. The password hash is excluded.
    pub async fn get_by_id(&self, id: UserId) -> Option<User> {
        self.store
            .users()
            .read()
            .await
            .get(&id)
            .map(|r| r.user.clone())
    }

    /// Get a user by their email address. The password hash is excluded.
    pub async fn get_by_email(&self, email: &Email) -> Option<User> {
        self.store
            .users()
            .read()
            .await
            .values()
            .find(|r| &r.user.email == email)
            .map(|r| r.user.clone())
    }

    /// Get a user together with their password hash, by email.
    ///
    /// Returns `None` if no user has this email. For login verification
    /// only; every other read path goes through the hash-free accessors.
    pub async fn get_password_hash(&self, email: &Email) -> Option<(User, String)> {
        self.store
            .users()
            .read()
            .await
            .values()
            .find(|r| &r.user.email == email)
            .map(|r| (r.user.clone(), r.password_hash.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::parse(username).unwrap(),
            email: Email::parse(email).unwrap(),
            password_hash: "$argon2id$fake$hash".to_owned(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let store = Store::new();
        let repo = UserRepository::new(&store);

        let created = repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let by_id = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(by_id.username.as_str(), "alice");

        let by_email = repo
            .get_by_email(&Email::parse("alice@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = Store::new();
        let repo = UserRepository::new(&store);

        repo.create(new_user("alice", "alice@example.com")).await.unwrap();
        let err = repo
            .create(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let store = Store::new();
        let repo = UserRepository::new(&store);

        repo.create(new_user("alice", "alice@example.com")).await.unwrap();
        let err = repo
            .create(new_user("bob", "ALICE@EXAMPLE.COM"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn password_hash_only_via_dedicated_accessor() {
        let store = Store::new();
        let repo = UserRepository::new(&store);
        repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let email = Email::parse("alice@example.com").unwrap();
        let (user, hash) = repo.get_password_hash(&email).await.unwrap();
        assert_eq!(user.email, email);
        assert_eq!(hash, "$argon2id$fake$hash");

        assert!(
            repo.get_password_hash(&Email::parse("nobody@example.com").unwrap())
                .await
                .is_none()
        );
    }
}
