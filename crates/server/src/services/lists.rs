//! Shopping-list service.
//!
//! Validates raw input into typed commands, delegates persistence to the
//! list repository, and orchestrates the image-file lifecycle beside the
//! document updates: save on upload, delete on replace, removal, and
//! list deletion.

use thiserror::Error;

use shoplist_core::{ListId, ProductId, UserId};

use crate::db::lists::ListRepository;
use crate::db::{RepositoryError, Store};
use crate::error::ValidationError;
use crate::models::{NewProduct, ProductPatch, ShoppingList};
use crate::storage::{ImageStore, ImageUpload, StorageError};

/// Errors that can occur during list and product operations.
#[derive(Debug, Error)]
pub enum ListError {
    /// One or more input fields failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// List absent or not owned by the caller — the same error either
    /// way, so ids cannot be probed across users.
    #[error("shopping list not found")]
    NotFound,

    /// Product absent from an otherwise accessible list.
    #[error("product not found")]
    ProductNotFound,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),

    /// Image storage error.
    #[error("image storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<RepositoryError> for ListError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::ProductNotFound => Self::ProductNotFound,
            other => Self::Repository(other),
        }
    }
}

/// Raw product fields as read off the wire, JSON or multipart alike.
#[derive(Debug, Default)]
pub struct ProductInput {
    /// Product name.
    pub name: Option<String>,
    /// Quantity; range-checked during validation.
    pub quantity: Option<i64>,
    /// Checked state.
    pub is_checked: Option<bool>,
    /// Uploaded image, not yet persisted.
    pub image: Option<ImageUpload>,
}

/// Shopping-list service.
pub struct ListService<'a> {
    lists: ListRepository<'a>,
    images: &'a ImageStore,
}

impl<'a> ListService<'a> {
    /// Create a new list service.
    #[must_use]
    pub const fn new(store: &'a Store, images: &'a ImageStore) -> Self {
        Self {
            lists: ListRepository::new(store),
            images,
        }
    }

    /// All lists owned by `owner`, newest-created first.
    pub async fn all_for_owner(&self, owner: UserId) -> Vec<ShoppingList> {
        self.lists.list_all_for_owner(owner).await
    }

    /// A single owned list.
    ///
    /// # Errors
    ///
    /// Returns `ListError::NotFound` if no owned list matches.
    pub async fn find(&self, owner: UserId, id: ListId) -> Result<ShoppingList, ListError> {
        self.lists
            .find_one_for_owner(id, owner)
            .await
            .ok_or(ListError::NotFound)
    }

    /// Create a list with an empty product collection.
    ///
    /// # Errors
    ///
    /// Returns `ListError::Validation` if the trimmed name is empty.
    pub async fn create(&self, owner: UserId, name: &str) -> Result<ShoppingList, ListError> {
        let name = name.trim();
        if name.is_empty() {
            let mut errors = ValidationError::new();
            errors.push("name", "Shopping list name is required");
            return Err(errors.into());
        }

        Ok(self.lists.create(owner, name.to_owned()).await)
    }

    /// Delete a list and every image file its products reference.
    ///
    /// # Errors
    ///
    /// Returns `ListError::NotFound` if no owned list matches and
    /// `ListError::Storage` if an image file cannot be deleted.
    pub async fn delete(&self, owner: UserId, id: ListId) -> Result<(), ListError> {
        let list = self.find(owner, id).await?;

        for product in &list.products {
            if let Some(image) = &product.image {
                self.images.delete(image).await?;
            }
        }

        if self.lists.delete_one(id, owner).await {
            Ok(())
        } else {
            Err(ListError::NotFound)
        }
    }

    /// Append a product to an owned list.
    ///
    /// # Errors
    ///
    /// Returns `ListError::Validation` for a missing/empty name or a
    /// quantity below 1, `ListError::NotFound` if no owned list matches,
    /// and `ListError::Storage` if the image upload cannot be persisted.
    pub async fn add_product(
        &self,
        owner: UserId,
        list_id: ListId,
        input: ProductInput,
    ) -> Result<ShoppingList, ListError> {
        let mut errors = ValidationError::new();

        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                errors.push("name", "Product name is required");
                None
            }
        };
        let quantity = match input.quantity.map(u32::try_from) {
            Some(Ok(quantity)) if quantity >= 1 => Some(quantity),
            _ => {
                errors.push("quantity", "Quantity must be a positive integer");
                None
            }
        };
        let (Some(name), Some(quantity)) = (name, quantity) else {
            return Err(errors.into());
        };

        let image = match &input.image {
            Some(upload) => Some(self.images.save(upload).await?),
            None => None,
        };

        let new = NewProduct {
            name,
            quantity,
            image: image.clone(),
            is_checked: input.is_checked.unwrap_or(false),
        };
        match self.lists.add_product(list_id, owner, new).await {
            Ok(list) => Ok(list),
            Err(err) => {
                self.discard(image.as_deref()).await;
                Err(err.into())
            }
        }
    }

    /// Patch a product; absent fields keep their prior values. A new
    /// image displaces (and deletes) the old file.
    ///
    /// # Errors
    ///
    /// Returns `ListError::Validation` for an empty name or a quantity
    /// below 1, `ListError::NotFound`/`ListError::ProductNotFound` for a
    /// missing list/product, and `ListError::Storage` if the image upload
    /// cannot be persisted.
    pub async fn update_product(
        &self,
        owner: UserId,
        list_id: ListId,
        product_id: ProductId,
        input: ProductInput,
    ) -> Result<ShoppingList, ListError> {
        let mut errors = ValidationError::new();

        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if name.is_empty() => {
                errors.push("name", "Product name cannot be empty");
                None
            }
            other => other.map(str::to_owned),
        };
        let quantity = match input.quantity.map(u32::try_from) {
            None => None,
            Some(Ok(quantity)) if quantity >= 1 => Some(quantity),
            Some(_) => {
                errors.push("quantity", "Quantity must be a positive integer");
                None
            }
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let image = match &input.image {
            Some(upload) => Some(self.images.save(upload).await?),
            None => None,
        };

        let patch = ProductPatch {
            name,
            quantity,
            image: image.clone(),
            is_checked: input.is_checked,
        };
        match self.lists.update_product(list_id, owner, product_id, patch).await {
            Ok(change) => {
                self.discard(change.displaced_image.as_deref()).await;
                Ok(change.list)
            }
            Err(err) => {
                self.discard(image.as_deref()).await;
                Err(err.into())
            }
        }
    }

    /// Remove a product, deleting its image file if it has one.
    ///
    /// # Errors
    ///
    /// Returns `ListError::NotFound`/`ListError::ProductNotFound` for a
    /// missing list/product.
    pub async fn remove_product(
        &self,
        owner: UserId,
        list_id: ListId,
        product_id: ProductId,
    ) -> Result<ShoppingList, ListError> {
        let change = self.lists.remove_product(list_id, owner, product_id).await?;
        self.discard(change.displaced_image.as_deref()).await;
        Ok(change.list)
    }

    /// Best-effort deletion of a no-longer-referenced file. The document
    /// update already happened, so a failure here is logged, not
    /// surfaced.
    async fn discard(&self, filename: Option<&str>) {
        if let Some(filename) = filename
            && let Err(err) = self.images.delete(filename).await
        {
            tracing::warn!(filename, error = %err, "failed to delete displaced image");
        }
    }
}
