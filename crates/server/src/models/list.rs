//! Shopping-list domain types.
//!
//! A [`ShoppingList`] is a single document: the list fields plus the full
//! ordered collection of its [`Product`] sub-records. Products have no
//! existence outside their parent list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplist_core::{ListId, ProductId, UserId};

/// A product line within a shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the parent list.
    pub id: ProductId,
    /// Product name, non-empty and trimmed.
    pub name: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Stored image filename, if one was uploaded.
    pub image: Option<String>,
    /// Whether the product has been checked off.
    pub is_checked: bool,
    /// When the product was added.
    pub created_at: DateTime<Utc>,
}

/// A shopping list owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    /// Unique list ID.
    pub id: ListId,
    /// List name, non-empty and trimmed.
    pub name: String,
    /// The owning user. Mandatory and immutable.
    pub user: UserId,
    /// Ordered product collection, oldest first.
    pub products: Vec<Product>,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
    /// When the list or any of its products last changed.
    pub updated_at: DateTime<Utc>,
}

/// Fields for appending a product to a list.
///
/// The repository assigns the id and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name, already validated non-empty.
    pub name: String,
    /// Quantity, already validated >= 1.
    pub quantity: u32,
    /// Stored image filename, if an image was uploaded.
    pub image: Option<String>,
    /// Initial checked state.
    pub is_checked: bool,
}

/// Partial-field patch for an existing product.
///
/// Only fields that are `Some` are applied; absent fields retain their
/// prior values.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New product name.
    pub name: Option<String>,
    /// New quantity.
    pub quantity: Option<u32>,
    /// New stored image filename. Setting this displaces any old image.
    pub image: Option<String>,
    /// New checked state.
    pub is_checked: Option<bool>,
}
