//! Low-stock alert: tracked active products about to hit zero.
//!
//! One candidate per pass regardless of how many products qualify; the copy
//! names up to three and the payload carries up to five so the dashboard
//! card stays bounded.

use serde_json::json;
use shop_data::models::ProductStatus;

use crate::analyzers::Analyzer;
use crate::config::EngineConfig;
use crate::insight::{InsightCandidate, InsightType, Severity};
use crate::snapshot::ShopSnapshot;

/// Summarizes tracked, active products with 0 < inventory <= threshold.
pub struct LowStockAlert;

const NAMES_SHOWN: usize = 3;
const PAYLOAD_PRODUCTS: usize = 5;

impl Analyzer for LowStockAlert {
    fn name(&self) -> &'static str {
        "low_stock_alert"
    }

    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>> {
        let low: Vec<_> = snap
            .products
            .iter()
            .filter(|p| {
                p.inventory_tracked
                    && p.status == ProductStatus::Active
                    && p.total_inventory > 0
                    && p.total_inventory <= cfg.low_stock_threshold
            })
            .collect();
        if low.is_empty() {
            return Ok(vec![]);
        }

        let mut names = low
            .iter()
            .take(NAMES_SHOWN)
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if low.len() > NAMES_SHOWN {
            names.push_str(&format!(" and {} more", low.len() - NAMES_SHOWN));
        }

        let plural = if low.len() > 1 { "s" } else { "" };
        Ok(vec![InsightCandidate {
            insight_type: InsightType::InventoryAlert,
            severity: Severity::High,
            title: format!("{} product{plural} running low on stock", low.len()),
            action_summary: format!(
                "Review inventory for: {names}. These products have {} or fewer \
                 units remaining.",
                cfg.low_stock_threshold
            ),
            expected_uplift: Some("Prevent stockout lost revenue".to_string()),
            confidence: 0.95,
            payload: json!({
                "low_stock_count": low.len(),
                "products": low
                    .iter()
                    .take(PAYLOAD_PRODUCTS)
                    .map(|p| json!({
                        "id": p.id,
                        "title": p.title,
                        "inventory": p.total_inventory,
                    }))
                    .collect::<Vec<_>>(),
            }),
            admin_deep_link: Some(format!(
                "/products?inventory_quantity_max={}",
                cfg.low_stock_threshold
            )),
        }])
    }
}

#[cfg(test)]
mod tests {
    use shop_data::models::Product;

    use crate::analyzers::testutil::{product, snapshot};

    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn single_candidate_summarizes_all_low_products() {
        let products: Vec<Product> = (1..=6)
            .map(|i| product(&format!("p{i}"), &format!("Product {i}"), 2))
            .collect();
        let snap = snapshot(products, vec![]);
        let got = LowStockAlert.analyze(&snap, &cfg()).unwrap();
        assert_eq!(got.len(), 1);

        let c = &got[0];
        assert_eq!(c.title, "6 products running low on stock");
        assert!(c.action_summary.contains("and 3 more"));
        assert_eq!(c.payload["low_stock_count"], 6);
        assert_eq!(c.payload["products"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn singular_title_for_one_product() {
        let snap = snapshot(vec![product("p1", "Lone Mug", 1)], vec![]);
        let got = LowStockAlert.analyze(&snap, &cfg()).unwrap();
        assert_eq!(got[0].title, "1 product running low on stock");
        assert!(!got[0].action_summary.contains("more"));
    }

    #[test]
    fn zero_inventory_and_untracked_and_drafts_are_excluded() {
        let mut sold_out = product("p1", "Sold Out", 0);
        sold_out.total_inventory = 0;
        let mut untracked = product("p2", "Untracked", 2);
        untracked.inventory_tracked = false;
        let mut draft = product("p3", "Draft", 2);
        draft.status = shop_data::models::ProductStatus::Draft;

        let snap = snapshot(vec![sold_out, untracked, draft], vec![]);
        assert!(LowStockAlert.analyze(&snap, &cfg()).unwrap().is_empty());
    }

    #[test]
    fn healthy_inventory_is_silent() {
        let snap = snapshot(vec![product("p1", "Plenty", 50)], vec![]);
        assert!(LowStockAlert.analyze(&snap, &cfg()).unwrap().is_empty());
    }
}
