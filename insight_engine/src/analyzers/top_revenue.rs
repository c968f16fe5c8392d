//! Revenue concentration: one product carrying too much of the business.
//!
//! Finds the single largest revenue contributor over the window and, when
//! its share clears the threshold, suggests protecting the position (stock
//! levels, a small price test). Filed as `pricing_opportunity` with the
//! uplift estimated at 5% of that product's window revenue.

use serde_json::json;

use crate::analyzers::{Analyzer, short_title};
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;
use crate::stats::{round1, round2};

/// Flags a top product whose revenue share passes the concentration bar.
pub struct TopRevenueConcentration;

impl Analyzer for TopRevenueConcentration {
    fn name(&self) -> &'static str {
        "top_revenue_concentration"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let total_revenue = snap.total_revenue();
        if total_revenue <= 0.0 {
            return Ok(vec![]);
        }
        let Some((product_id, top)) = snap
            .tallies()
            .iter()
            .max_by(|a, b| a.1.revenue.total_cmp(&b.1.revenue))
        else {
            return Ok(vec![]);
        };

        let share_pct = top.revenue / total_revenue * 100.0;
        if share_pct < cfg.revenue_share_threshold_pct {
            return Ok(vec![]);
        }

        Ok(vec![InsightCandidate {
            insight_type: InsightType::PricingOpportunity,
            severity: Severity::Medium,
            title: format!(
                "\"{}\" drives {share_pct:.0}% of your revenue",
                short_title(&top.title)
            ),
            action_summary: format!(
                "Your top product generated ${:.2} from {} units. Consider protecting \
                 this revenue by maintaining stock levels and testing a small price \
                 increase.",
                top.revenue, top.units
            ),
            expected_uplift: Some(format!(
                "+${:.0}/month with 5% price test",
                top.revenue * 0.05
            )),
            confidence: 0.90,
            payload: json!({
                "product_id": product_id,
                "product_title": top.title,
                "revenue": round2(top.revenue),
                "units": top.units,
                "revenue_share_pct": round1(share_pct),
            }),
            admin_deep_link: None,
        }])
    }
}
