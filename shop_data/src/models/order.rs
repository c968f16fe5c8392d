//! Canonical in-memory representation of a shop order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of an order: a product (when resolvable) with quantity and the
/// pre-discount amount charged for the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product GID. `None` when the line no longer maps to a product
    /// (deleted products, custom line items); analyzers skip those.
    pub product_id: Option<String>,
    /// Product title as captured at order time.
    pub title: String,
    /// Units ordered on this line.
    pub quantity: i64,
    /// Line revenue in shop currency.
    pub amount: f64,
}

/// A discount code applied to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCode {
    /// The code as entered at checkout.
    pub code: String,
}

/// A synced order with its line items and any discount codes used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Shopify order GID.
    pub id: String,
    /// When the order was processed (UTC, timezone-aware upstream).
    pub processed_at: DateTime<Utc>,
    /// Order total in shop currency.
    pub total_price: f64,
    /// Ordered sequence of line items.
    pub line_items: Vec<LineItem>,
    /// Discount codes applied at checkout; empty when none.
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

impl Order {
    /// Whether any discount code was used on this order.
    pub fn is_discounted(&self) -> bool {
        !self.discount_codes.is_empty()
    }
}
