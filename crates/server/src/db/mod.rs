//! In-process document store.
//!
//! Two keyed collections (users, shopping lists) behind async read/write
//! locks. A whole document is read or rewritten under a single lock
//! acquisition, which is the only atomicity guarantee the repositories
//! rely on: two concurrent edits to the same list race at last-write-wins
//! granularity, with no optimistic locking and no merge.
//!
//! The store knows nothing about the filesystem; image cleanup belongs to
//! the service layer.

pub mod lists;
pub mod users;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use shoplist_core::{ListId, UserId};

use crate::models::{ShoppingList, UserRecord};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested list was not found (or is not owned by the caller).
    #[error("shopping list not found")]
    NotFound,

    /// Requested product was not found within its list.
    #[error("product not found")]
    ProductNotFound,

    /// Constraint violation (e.g., duplicate username or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Handle to the document store, cheaply cloneable via `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    users: RwLock<HashMap<UserId, UserRecord>>,
    lists: RwLock<HashMap<ListId, ShoppingList>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn users(&self) -> &RwLock<HashMap<UserId, UserRecord>> {
        &self.inner.users
    }

    pub(crate) fn lists(&self) -> &RwLock<HashMap<ListId, ShoppingList>> {
        &self.inner.lists
    }
}
