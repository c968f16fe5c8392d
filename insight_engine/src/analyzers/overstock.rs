//! Overstock slow movers: dead stock detection.
//!
//! Inventory above the P80 of positive inventory levels combined with sales
//! at or below the P20 of the sales distribution (zeros included — most
//! catalogs have a long tail of non-sellers, and P20 is often 0, which is
//! exactly the point: no sales at all qualifies).

use serde_json::json;

use crate::analyzers::{Analyzer, short_title};
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;
use crate::stats::percentile;

/// Flags high-inventory, bottom-percentile-sales products.
pub struct OverstockSlowMovers;

impl Analyzer for OverstockSlowMovers {
    fn name(&self) -> &'static str {
        "overstock_slow_movers"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let inventories: Vec<f64> = snap
            .products
            .iter()
            .filter(|p| p.total_inventory > 0)
            .map(|p| p.total_inventory as f64)
            .collect();
        let sales: Vec<f64> = snap
            .products
            .iter()
            .map(|p| snap.units_sold(&p.id) as f64)
            .collect();

        let (Some(inventory_bar), Some(sales_bar)) = (
            percentile(&inventories, cfg.overstock_inventory_pct),
            percentile(&sales, cfg.slow_mover_sales_pct),
        ) else {
            return Ok(vec![]);
        };

        let mut out = Vec::new();
        for product in &snap.products {
            let units_sold = snap.units_sold(&product.id);
            if product.total_inventory as f64 > inventory_bar
                && units_sold as f64 <= sales_bar
            {
                out.push(InsightCandidate {
                    insight_type: InsightType::OverstockSlowMover,
                    severity: Severity::Medium,
                    title: format!("Dead stock detected: {}", short_title(&product.title)),
                    action_summary: format!(
                        "{} units in stock but only {} sold in {} days. Consider BOGO \
                         offers, bundling, or targeted discounts to move inventory.",
                        product.total_inventory, units_sold, cfg.window_days
                    ),
                    expected_uplift: Some("Clear dead stock value".to_string()),
                    confidence: 0.75,
                    payload: json!({
                        "product_id": product.id,
                        "product_title": product.title,
                        "current_inventory": product.total_inventory,
                        "units_sold_30d": units_sold,
                    }),
                    admin_deep_link: Some(format!("/products/{}", product.admin_id())),
                });
            }
        }
        Ok(out)
    }
}
