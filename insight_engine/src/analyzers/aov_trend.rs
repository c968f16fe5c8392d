//! AOV trend: week-over-month shift in average order value.
//!
//! Compares the recent-window AOV against the full-window AOV and reports
//! changes past the significance threshold. A falling AOV is the actionable
//! direction and gets the higher severity; a rising one is informational.
//! A minimum recent-order count keeps one large order from looking like a
//! trend.

use serde_json::json;

use crate::analyzers::Analyzer;
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;
use crate::stats::round1;

/// Reports significant AOV movement between the 7-day and 30-day windows.
pub struct AovTrend;

impl Analyzer for AovTrend {
    fn name(&self) -> &'static str {
        "aov_trend"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let total_orders = snap.order_count();
        if total_orders == 0 {
            return Ok(vec![]);
        }
        let aov_30d = snap.total_revenue() / total_orders as f64;

        let recent: Vec<_> = snap.recent_orders(cfg.recent_window_days).collect();
        let recent_orders = recent.len();
        if aov_30d <= 0.0 || recent_orders < cfg.min_recent_orders {
            return Ok(vec![]);
        }
        let recent_revenue: f64 = recent.iter().map(|o| o.total_price).sum();
        let aov_7d = recent_revenue / recent_orders as f64;

        let change_pct = (aov_7d - aov_30d) / aov_30d * 100.0;
        if change_pct.abs() < cfg.aov_change_threshold_pct {
            return Ok(vec![]);
        }

        let (severity, title, action_summary) = if change_pct > 0.0 {
            (
                Severity::Low,
                format!("Average order value is up {change_pct:.0}% this week"),
                format!(
                    "Your AOV increased from ${aov_30d:.2} (30-day avg) to ${aov_7d:.2} \
                     (last 7 days). Consider promoting bundles or upsells to maintain \
                     this momentum."
                ),
            )
        } else {
            (
                Severity::Medium,
                format!(
                    "Average order value dropped {:.0}% this week",
                    change_pct.abs()
                ),
                format!(
                    "Your AOV fell from ${aov_30d:.2} (30-day avg) to ${aov_7d:.2} \
                     (last 7 days). Consider adding product bundles, free shipping \
                     thresholds, or cross-sell recommendations."
                ),
            )
        };

        Ok(vec![InsightCandidate {
            insight_type: InsightType::TrendDetection,
            severity,
            title,
            action_summary,
            expected_uplift: Some(format!("AOV target: ${aov_30d:.2}")),
            confidence: 0.85,
            payload: json!({
                "aov_30d": aov_30d,
                "aov_7d": aov_7d,
                "change_pct": round1(change_pct),
            }),
            admin_deep_link: None,
        }])
    }
}
