//! Coupon cannibalization: best sellers being needlessly discounted.
//!
//! For each product the discount rate is the share of its order appearances
//! that carried a discount code. High rate alone is noise on low-value
//! products, so a P60 revenue significance bar keeps the rule focused on
//! products where margin leakage actually matters.

use serde_json::json;

use crate::analyzers::{Analyzer, short_title};
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;
use crate::stats::{percentile, round2};

/// Flags products with a high discount rate and top-percentile revenue.
pub struct CouponCannibalization;

impl Analyzer for CouponCannibalization {
    fn name(&self) -> &'static str {
        "coupon_cannibalization"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let revenues: Vec<f64> = snap
            .tallies()
            .values()
            .filter(|t| t.orders_total > 0)
            .map(|t| t.revenue)
            .collect();
        let Some(revenue_bar) = percentile(&revenues, cfg.cannibalization_revenue_pct) else {
            return Ok(vec![]);
        };

        let mut out = Vec::new();
        for (product_id, tally) in snap.tallies() {
            if tally.orders_total == 0 {
                continue;
            }
            let discount_rate = f64::from(tally.orders_discounted) / f64::from(tally.orders_total);

            if discount_rate > cfg.discount_rate_threshold && tally.revenue > revenue_bar {
                out.push(InsightCandidate {
                    insight_type: InsightType::CouponCannibalization,
                    severity: Severity::Medium,
                    title: format!("Coupon overuse: {}", short_title(&tally.title)),
                    action_summary: format!(
                        "{:.0}% of orders use discounts, but this product sells well \
                         anyway. Tighten coupon eligibility rules to reduce margin leakage.",
                        discount_rate * 100.0
                    ),
                    expected_uplift: Some("Reduce margin leakage".to_string()),
                    confidence: 0.70,
                    payload: json!({
                        "product_id": product_id,
                        "product_title": tally.title,
                        "discount_rate": round2(discount_rate),
                        "total_revenue": round2(tally.revenue),
                    }),
                    admin_deep_link: Some("/discounts".to_string()),
                });
            }
        }
        Ok(out)
    }
}
