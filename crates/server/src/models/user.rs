//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplist_core::{Email, UserId, Username};

/// A registered user (domain type).
///
/// This is the shape exposed to callers; the password hash lives only in
/// [`UserRecord`] and never leaves the repository except through
/// [`crate::db::users::UserRepository::get_password_hash`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, unique across users.
    pub username: Username,
    /// Lowercase-normalized email, unique across users.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A stored user record, including the password hash.
///
/// Deliberately not `Serialize`: the hash must never reach a wire format.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// The public user fields.
    pub user: User,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
}
