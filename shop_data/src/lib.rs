//! Typed shop records and the data-source seam for the insight engine.
//!
//! This crate owns the canonical in-memory representation of synced Shopify
//! data (products, orders with line items and discount codes) and the
//! [`source::ShopDataSource`] trait through which consumers obtain a
//! per-shop snapshot. Fetching, pagination, and retry against the Shopify
//! GraphQL API happen upstream; everything here is already parsed and typed.

#![deny(missing_docs)]

pub mod memory;
pub mod models;
pub mod source;
