//! Understocked winners: fast movers at risk of stockout.
//!
//! A product qualifies as a "winner" when its window sales clear the P50 of
//! all products that sold at least one unit — a scale-adaptive bar. The
//! stockout trigger itself (fewer than `stockout_horizon_days` of inventory
//! at the current daily rate) is a fixed operational constant.

use serde_json::json;

use crate::analyzers::{Analyzer, short_title};
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;
use crate::stats::{percentile, round1, round2};

/// Flags high-velocity products with days of inventory below the horizon.
pub struct UnderstockedWinners;

impl Analyzer for UnderstockedWinners {
    fn name(&self) -> &'static str {
        "understocked_winners"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let sellers: Vec<f64> = snap
            .tallies()
            .values()
            .filter(|t| t.units > 0)
            .map(|t| t.units as f64)
            .collect();
        let Some(sales_bar) = percentile(&sellers, cfg.sales_significance_pct) else {
            // Nothing sold in the window.
            return Ok(vec![]);
        };

        let mut out = Vec::new();
        for product in &snap.products {
            let sales = snap.units_sold(&product.id);
            if (sales as f64) < sales_bar {
                continue;
            }

            let daily_sales = sales as f64 / cfg.window_days as f64;
            if daily_sales <= 0.0 {
                continue;
            }
            let days_remaining = product.total_inventory as f64 / daily_sales;

            if days_remaining < cfg.stockout_horizon_days {
                out.push(InsightCandidate {
                    insight_type: InsightType::UnderstockedWinner,
                    severity: Severity::High,
                    title: format!("Low stock alert: {}", short_title(&product.title)),
                    action_summary: format!(
                        "Only {} units left (~{:.0} days). Consider restocking or \
                         enabling pre-orders to avoid stockout.",
                        product.total_inventory, days_remaining
                    ),
                    expected_uplift: Some("Prevent stockout revenue loss".to_string()),
                    confidence: 0.85,
                    payload: json!({
                        "product_id": product.id,
                        "product_title": product.title,
                        "current_inventory": product.total_inventory,
                        "daily_sales": round2(daily_sales),
                        "days_remaining": round1(days_remaining),
                    }),
                    admin_deep_link: Some(format!("/products/{}", product.admin_id())),
                });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzers::testutil::{line, order, product, snapshot};

    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn three_days_of_stock_fires() {
        // 30 units over 30 days -> 1/day; inventory 3 -> 3 days remaining.
        let snap = snapshot(
            vec![product("gid://shopify/Product/1", "Best Seller", 3)],
            vec![order(
                "o1",
                5,
                false,
                vec![line("gid://shopify/Product/1", 30, 600.0)],
            )],
        );
        let got = UnderstockedWinners.analyze(&snap, &cfg()).unwrap();
        assert_eq!(got.len(), 1);
        let c = &got[0];
        assert_eq!(c.insight_type, InsightType::UnderstockedWinner);
        assert_eq!(c.severity, Severity::High);
        assert_eq!(c.payload["days_remaining"], 3.0);
        assert_eq!(c.payload["daily_sales"], 1.0);
        assert_eq!(c.admin_deep_link.as_deref(), Some("/products/1"));
    }

    #[test]
    fn hundred_days_of_stock_does_not_fire() {
        let snap = snapshot(
            vec![product("p1", "Steady Seller", 100)],
            vec![order("o1", 5, false, vec![line("p1", 30, 600.0)])],
        );
        assert!(UnderstockedWinners.analyze(&snap, &cfg()).unwrap().is_empty());
    }

    #[test]
    fn below_median_sales_is_ignored_even_when_stock_is_short() {
        // p_slow sells 2 (below P50 of [2, 30, 40]) with 1 unit left.
        let snap = snapshot(
            vec![
                product("p_slow", "Slow", 1),
                product("p_fast", "Fast", 500),
                product("p_faster", "Faster", 500),
            ],
            vec![
                order("o1", 3, false, vec![line("p_slow", 2, 20.0)]),
                order("o2", 3, false, vec![line("p_fast", 30, 300.0)]),
                order("o3", 3, false, vec![line("p_faster", 40, 400.0)]),
            ],
        );
        let got = UnderstockedWinners.analyze(&snap, &cfg()).unwrap();
        assert!(got.iter().all(|c| c.payload["product_id"] != "p_slow"));
    }

    #[test]
    fn no_sales_at_all_emits_nothing() {
        let snap = snapshot(vec![product("p1", "Unsold", 2)], vec![]);
        assert!(UnderstockedWinners.analyze(&snap, &cfg()).unwrap().is_empty());
    }

    #[test]
    fn zero_inventory_fast_mover_fires_with_zero_days() {
        let snap = snapshot(
            vec![product("p1", "Gone", 0)],
            vec![order("o1", 2, false, vec![line("p1", 15, 150.0)])],
        );
        let got = UnderstockedWinners.analyze(&snap, &cfg()).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].payload["days_remaining"], 0.0);
    }
}
