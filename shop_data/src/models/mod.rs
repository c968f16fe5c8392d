//! Canonical shop record types.

mod order;
mod product;

pub use order::{DiscountCode, LineItem, Order};
pub use product::{Product, ProductStatus};
