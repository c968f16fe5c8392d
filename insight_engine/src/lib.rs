//! Insight generation for a shop: rule-based analyzers over synced
//! product/order data, reconciled into a persisted, deduplicated insight set.
//!
//! The flow is one pass per shop, triggered after a data sync:
//! [`engine::generate_insights`] pulls a snapshot through a
//! [`shop_data::source::ShopDataSource`], runs every [`analyzers::Analyzer`],
//! and merges the resulting candidates into the [`store::InsightStore`] so
//! that at most one *active* insight exists per (shop, type).

#![deny(missing_docs)]

pub mod analyzers;
pub mod config;
pub mod db;
pub mod engine;
pub mod insight;
pub mod models;
pub mod payload;
pub mod schema;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod tz;
