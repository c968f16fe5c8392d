//! Insight domain types: classification enums and the ephemeral candidate.
//!
//! A candidate is what one analyzer emits during a pass; it only becomes a
//! persisted row (see [`crate::models::InsightRow`]) once reconciliation
//! decides whether to create or refresh.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of insight the engine can generate (serde snake_case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Fast mover at risk of stockout.
    UnderstockedWinner,
    /// High inventory, bottom-percentile sales.
    OverstockSlowMover,
    /// Best seller being needlessly discounted.
    CouponCannibalization,
    /// Significant AOV shift week-over-month.
    TrendDetection,
    /// Tracked active products close to zero stock.
    InventoryAlert,
    /// Revenue concentrated in a single product.
    PricingOpportunity,
}

/// How urgent an insight is for the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Needs attention immediately.
    Critical,
    /// Act soon.
    High,
    /// Worth a look.
    Medium,
    /// Informational.
    Low,
}

/// Unknown text value while decoding a stored enum column.
#[derive(Debug, Error)]
#[error("unknown {what}: {value}")]
pub struct ParseEnumError {
    what: &'static str,
    value: String,
}

impl InsightType {
    /// Stable text form used in the store and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderstockedWinner => "understocked_winner",
            Self::OverstockSlowMover => "overstock_slow_mover",
            Self::CouponCannibalization => "coupon_cannibalization",
            Self::TrendDetection => "trend_detection",
            Self::InventoryAlert => "inventory_alert",
            Self::PricingOpportunity => "pricing_opportunity",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "understocked_winner" => Ok(Self::UnderstockedWinner),
            "overstock_slow_mover" => Ok(Self::OverstockSlowMover),
            "coupon_cannibalization" => Ok(Self::CouponCannibalization),
            "trend_detection" => Ok(Self::TrendDetection),
            "inventory_alert" => Ok(Self::InventoryAlert),
            "pricing_opportunity" => Ok(Self::PricingOpportunity),
            _ => Err(ParseEnumError {
                what: "insight type",
                value: s.to_string(),
            }),
        }
    }
}

impl Severity {
    /// Stable text form used in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseEnumError {
                what: "severity",
                value: s.to_string(),
            }),
        }
    }
}

/// One analyzer finding, alive only for the duration of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightCandidate {
    /// Which rule fired.
    pub insight_type: InsightType,
    /// Urgency for the merchant.
    pub severity: Severity,
    /// Short headline shown on the dashboard.
    pub title: String,
    /// What the merchant should do about it.
    pub action_summary: String,
    /// Free-text expected benefit, when the rule can estimate one.
    pub expected_uplift: Option<String>,
    /// Hand-tuned confidence in \[0, 1\].
    pub confidence: f64,
    /// Supporting metrics, shaped per type (see [`crate::payload`]).
    pub payload: serde_json::Value,
    /// Optional Shopify-admin path for a one-click jump.
    pub admin_deep_link: Option<String>,
}
