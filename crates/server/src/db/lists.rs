//! Shopping-list repository.
//!
//! Every operation is owner-scoped: a list never matches a query issued
//! with the wrong `UserId`, and the caller cannot distinguish "absent"
//! from "owned by someone else".
//!
//! Products are sub-records of their list document. Lookup by product id
//! is a linear scan over the list's product collection (lists are small;
//! O(n) is acceptable and stated). Every product mutation rewrites the
//! whole list under the store's write lock — that single-document atomic
//! rewrite is the explicit contract, not an incidental behavior.

use chrono::Utc;

use shoplist_core::{ListId, ProductId, UserId};

use super::{RepositoryError, Store};
use crate::models::{NewProduct, Product, ProductPatch, ShoppingList};

/// Outcome of a product mutation.
///
/// `displaced_image` carries the filename of an image the mutation made
/// unreferenced (replaced on update, orphaned on removal). The repository
/// never touches the filesystem; the caller deletes the file.
#[derive(Debug)]
pub struct ProductChange {
    /// The full list after the mutation.
    pub list: ShoppingList,
    /// Image filename no longer referenced by any product.
    pub displaced_image: Option<String>,
}

/// Repository for shopping-list documents.
pub struct ListRepository<'a> {
    store: &'a Store,
}

impl<'a> ListRepository<'a> {
    /// Create a new list repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All lists belonging to `owner`, newest-created first.
    pub async fn list_all_for_owner(&self, owner: UserId) -> Vec<ShoppingList> {
        let lists = self.store.lists().read().await;
        let mut result: Vec<ShoppingList> =
            lists.values().filter(|l| l.user == owner).cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// A single list by id, if it exists and belongs to `owner`.
    pub async fn find_one_for_owner(&self, id: ListId, owner: UserId) -> Option<ShoppingList> {
        self.store
            .lists()
            .read()
            .await
            .get(&id)
            .filter(|l| l.user == owner)
            .cloned()
    }

    /// Create a list with an empty product collection.
    pub async fn create(&self, owner: UserId, name: String) -> ShoppingList {
        let now = Utc::now();
        let list = ShoppingList {
            id: ListId::generate(),
            name,
            user: owner,
            products: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.lists().write().await.insert(list.id, list.clone());
        list
    }

    /// Delete a list.
    ///
    /// Returns `true` if a list was removed, `false` if no owned list
    /// matched. The caller is responsible for deleting any product image
    /// files beforehand.
    pub async fn delete_one(&self, id: ListId, owner: UserId) -> bool {
        let mut lists = self.store.lists().write().await;
        if lists.get(&id).is_some_and(|l| l.user == owner) {
            lists.remove(&id);
            true
        } else {
            false
        }
    }

    /// Append a product to a list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned list matches.
    pub async fn add_product(
        &self,
        id: ListId,
        owner: UserId,
        new: NewProduct,
    ) -> Result<ShoppingList, RepositoryError> {
        let mut lists = self.store.lists().write().await;
        let list = lists
            .get_mut(&id)
            .filter(|l| l.user == owner)
            .ok_or(RepositoryError::NotFound)?;

        list.products.push(Product {
            id: ProductId::generate(),
            name: new.name,
            quantity: new.quantity,
            image: new.image,
            is_checked: new.is_checked,
            created_at: Utc::now(),
        });
        list.updated_at = Utc::now();

        Ok(list.clone())
    }

    /// Apply a partial-field patch to one product.
    ///
    /// Only fields present in the patch are mutated; absent fields keep
    /// their prior values. When the patch carries a new image and the
    /// product already had one, the old filename is reported back as
    /// displaced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned list matches, and
    /// `RepositoryError::ProductNotFound` if the list has no such product.
    pub async fn update_product(
        &self,
        id: ListId,
        owner: UserId,
        product_id: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductChange, RepositoryError> {
        let mut lists = self.store.lists().write().await;
        let list = lists
            .get_mut(&id)
            .filter(|l| l.user == owner)
            .ok_or(RepositoryError::NotFound)?;

        let product = list
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(RepositoryError::ProductNotFound)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        if let Some(is_checked) = patch.is_checked {
            product.is_checked = is_checked;
        }
        let mut displaced_image = None;
        if let Some(image) = patch.image {
            displaced_image = product.image.replace(image);
        }
        list.updated_at = Utc::now();

        Ok(ProductChange {
            list: list.clone(),
            displaced_image,
        })
    }

    /// Remove one product from a list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned list matches, and
    /// `RepositoryError::ProductNotFound` if the list has no such product.
    pub async fn remove_product(
        &self,
        id: ListId,
        owner: UserId,
        product_id: ProductId,
    ) -> Result<ProductChange, RepositoryError> {
        let mut lists = self.store.lists().write().await;
        let list = lists
            .get_mut(&id)
            .filter(|l| l.user == owner)
            .ok_or(RepositoryError::NotFound)?;

        let index = list
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or(RepositoryError::ProductNotFound)?;

        let removed = list.products.remove(index);
        list.updated_at = Utc::now();

        Ok(ProductChange {
            list: list.clone(),
            displaced_image: removed.image,
        })
    }
}
