//! Canonical in-memory representation of a shop product.
//!
//! Products are read-only inputs to the insight analyzers; nothing in this
//! workspace mutates them after sync.

use serde::{Deserialize, Serialize};

/// Shopify product status (serde snake_case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Published and purchasable.
    Active,
    /// Removed from the storefront but retained.
    Archived,
    /// Not yet published.
    Draft,
}

/// A synced product with its inventory position.
///
/// `id` is the opaque Shopify GID (e.g., `gid://shopify/Product/123`), not a
/// database key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Shopify product GID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Publication status.
    pub status: ProductStatus,
    /// Total units on hand across locations. Never negative after sync.
    pub total_inventory: i64,
    /// Whether Shopify tracks inventory for this product.
    pub inventory_tracked: bool,
}

impl Product {
    /// Trailing numeric segment of the GID, used to build admin deep links.
    ///
    /// `gid://shopify/Product/123` -> `123`. Falls back to the whole id when
    /// there is no `/` separator.
    pub fn admin_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}
