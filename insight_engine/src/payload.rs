//! Per-type payload schemas, checked at the reconciliation boundary.
//!
//! Payloads are free-shape JSON maps so analyzers can evolve their metrics
//! without store migrations, but each type still has a minimum contract the
//! dashboard depends on. Candidates failing the check are rejected before
//! they reach storage, which turns an analyzer bug into a logged skip rather
//! than a corrupt row.

use thiserror::Error;

use crate::insight::InsightType;

/// A candidate payload that does not satisfy its type's schema.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload is not a JSON object.
    #[error("{insight_type} payload must be a JSON object")]
    NotAnObject {
        /// Offending insight type.
        insight_type: InsightType,
    },

    /// A required key is absent.
    #[error("{insight_type} payload missing required key `{key}`")]
    MissingKey {
        /// Offending insight type.
        insight_type: InsightType,
        /// The absent key.
        key: &'static str,
    },
}

/// Keys every payload of the given type must carry.
pub fn required_keys(insight_type: InsightType) -> &'static [&'static str] {
    match insight_type {
        InsightType::UnderstockedWinner => &[
            "product_id",
            "product_title",
            "current_inventory",
            "daily_sales",
            "days_remaining",
        ],
        InsightType::OverstockSlowMover => &[
            "product_id",
            "product_title",
            "current_inventory",
            "units_sold_30d",
        ],
        InsightType::CouponCannibalization => &[
            "product_id",
            "product_title",
            "discount_rate",
            "total_revenue",
        ],
        InsightType::TrendDetection => &["aov_30d", "aov_7d", "change_pct"],
        InsightType::InventoryAlert => &["low_stock_count", "products"],
        InsightType::PricingOpportunity => &[
            "product_id",
            "product_title",
            "revenue",
            "units",
            "revenue_share_pct",
        ],
    }
}

/// Validate a candidate payload against its type's schema.
pub fn validate_payload(
    insight_type: InsightType,
    payload: &serde_json::Value,
) -> Result<(), PayloadError> {
    let map = payload
        .as_object()
        .ok_or(PayloadError::NotAnObject { insight_type })?;
    for key in required_keys(insight_type) {
        if !map.contains_key(*key) {
            return Err(PayloadError::MissingKey { insight_type, key });
        }
    }
    Ok(())
}
