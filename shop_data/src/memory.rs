//! In-memory [`ShopDataSource`] over pre-fetched records.
//!
//! The insight engine always runs on data a sync pass has already pulled, so
//! the common adapter is simply "the records we just synced, held in memory".
//! Also the fixture source for engine tests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{Order, Product};
use crate::source::{ShopDataSource, SourceError};

/// A snapshot source holding records for one or more shops.
#[derive(Debug, Default)]
pub struct MemorySource {
    shops: HashMap<String, ShopRecords>,
}

#[derive(Debug, Default)]
struct ShopRecords {
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl MemorySource {
    /// Empty source; populate with [`MemorySource::insert_shop`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the records for a shop.
    pub fn insert_shop(&mut self, shop_id: &str, products: Vec<Product>, orders: Vec<Order>) {
        self.shops
            .insert(shop_id.to_string(), ShopRecords { products, orders });
    }

    /// Convenience constructor for a single shop.
    pub fn for_shop(shop_id: &str, products: Vec<Product>, orders: Vec<Order>) -> Self {
        let mut src = Self::new();
        src.insert_shop(shop_id, products, orders);
        src
    }

    fn records(&self, shop_id: &str) -> Result<&ShopRecords, SourceError> {
        self.shops
            .get(shop_id)
            .ok_or_else(|| SourceError::UnknownShop(shop_id.to_string()))
    }
}

impl ShopDataSource for MemorySource {
    fn products(&self, shop_id: &str) -> Result<Vec<Product>, SourceError> {
        Ok(self.records(shop_id)?.products.clone())
    }

    fn orders_since(
        &self,
        shop_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Order>, SourceError> {
        Ok(self
            .records(shop_id)?
            .orders
            .iter()
            .filter(|o| o.processed_at >= since)
            .cloned()
            .collect())
    }
}
