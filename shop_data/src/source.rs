//! Data-source abstraction for per-shop snapshots.
//!
//! [`ShopDataSource`] is the seam between the insight engine and wherever the
//! synced records actually live (a sync database, a warm cache, a fixture in
//! tests). Implementations return already-parsed records; there is no paging
//! or retry at this level.
//!
//! The trait is object-safe so callers can hold a `Box<dyn ShopDataSource>`
//! and pick the backing at runtime.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Order, Product};

/// The unified error type for data-source implementations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The shop is not known to this source.
    #[error("unknown shop: {0}")]
    UnknownShop(String),

    /// The backing storage failed (e.g., database read, cache miss path).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Read access to a shop's synced records.
pub trait ShopDataSource {
    /// All products currently synced for the shop.
    fn products(&self, shop_id: &str) -> Result<Vec<Product>, SourceError>;

    /// Orders processed at or after `since`, any order.
    fn orders_since(
        &self,
        shop_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Order>, SourceError>;
}
