//! One immutable view of a shop for a single analysis pass.
//!
//! [`ShopSnapshot`] owns the products, the windowed orders, and the pass
//! timestamp, and tallies per-product line-item metrics exactly once so each
//! analyzer reads the same aggregates instead of re-walking every order.
//! Tallies live in an [`IndexMap`] keyed by product id in first-seen order,
//! which keeps candidate emission (and therefore within-pass last-write-wins
//! reconciliation) deterministic.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use shop_data::models::{Order, Product};

/// Per-product aggregates over the order window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTally {
    /// Title as captured on the most recent line item seen.
    pub title: String,
    /// Units sold across all line items.
    pub units: i64,
    /// Line-item revenue summed across all appearances.
    pub revenue: f64,
    /// Number of line items the product appeared on.
    pub orders_total: u32,
    /// Of those, how many belonged to an order with a discount code.
    pub orders_discounted: u32,
}

/// Immutable (products, orders) view for one pass.
#[derive(Debug)]
pub struct ShopSnapshot {
    /// All synced products.
    pub products: Vec<Product>,
    /// Orders inside the analysis window.
    pub orders: Vec<Order>,
    /// The pass timestamp; window arithmetic is relative to this.
    pub now: DateTime<Utc>,
    tallies: IndexMap<String, ProductTally>,
}

impl ShopSnapshot {
    /// Build the snapshot and tally line items once.
    ///
    /// Line items without a product id (deleted products, custom lines) are
    /// skipped; they cannot be attributed.
    pub fn new(products: Vec<Product>, orders: Vec<Order>, now: DateTime<Utc>) -> Self {
        let mut tallies: IndexMap<String, ProductTally> = IndexMap::new();
        for order in &orders {
            let discounted = order.is_discounted();
            for item in &order.line_items {
                let Some(product_id) = &item.product_id else {
                    continue;
                };
                let tally = tallies.entry(product_id.clone()).or_default();
                tally.title = item.title.clone();
                tally.units += item.quantity;
                tally.revenue += item.amount;
                tally.orders_total += 1;
                if discounted {
                    tally.orders_discounted += 1;
                }
            }
        }
        Self {
            products,
            orders,
            now,
            tallies,
        }
    }

    /// Per-product aggregates, keyed by product id in first-seen order.
    pub fn tallies(&self) -> &IndexMap<String, ProductTally> {
        &self.tallies
    }

    /// Units sold for one product over the window; 0 when it never sold.
    pub fn units_sold(&self, product_id: &str) -> i64 {
        self.tallies.get(product_id).map_or(0, |t| t.units)
    }

    /// Order count over the whole window.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Revenue over the whole window (sum of order totals).
    pub fn total_revenue(&self) -> f64 {
        self.orders.iter().map(|o| o.total_price).sum()
    }

    /// Orders processed within the last `days` before the pass timestamp.
    pub fn recent_orders(&self, days: i64) -> impl Iterator<Item = &Order> {
        let cutoff = self.now - Duration::days(days);
        self.orders.iter().filter(move |o| o.processed_at >= cutoff)
    }
}
