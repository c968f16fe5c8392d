//! Rule engines that turn a shop snapshot into insight candidates.
//!
//! Every analyzer is a pure function over one immutable [`ShopSnapshot`]:
//! no analyzer writes anything, and they are order-independent apart from
//! within-pass last-write-wins when a per-product rule emits several
//! candidates of the same type. Significance bars are percentile-based so
//! they adapt to the shop's own scale; operational triggers (7 days of
//! stock, 5 units left) are deliberately fixed because they mean the same
//! thing for every shop.

mod aov_trend;
mod coupons;
mod inventory;
mod overstock;
mod top_revenue;
mod understocked;

pub use aov_trend::AovTrend;
pub use coupons::CouponCannibalization;
pub use inventory::LowStockAlert;
pub use overstock::OverstockSlowMovers;
pub use top_revenue::TopRevenueConcentration;
pub use understocked::UnderstockedWinners;

use crate::config::EngineConfig;
use crate::insight::InsightCandidate;
use crate::snapshot::ShopSnapshot;

/// A pure rule engine over one shop snapshot.
pub trait Analyzer {
    /// Stable name used in logs when the analyzer fails or is skipped.
    fn name(&self) -> &'static str;

    /// Produce zero or more candidates from the snapshot.
    fn analyze(
        &self,
        snap: &ShopSnapshot,
        cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<InsightCandidate>>;
}

/// The full production set, in the order candidates are reconciled.
pub fn default_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(UnderstockedWinners),
        Box::new(OverstockSlowMovers),
        Box::new(CouponCannibalization),
        Box::new(AovTrend),
        Box::new(LowStockAlert),
        Box::new(TopRevenueConcentration),
    ]
}

/// Product titles are clipped in insight copy so headlines stay scannable.
pub(crate) fn short_title(title: &str) -> String {
    const MAX: usize = 50;
    if title.chars().count() <= MAX {
        title.to_string()
    } else {
        title.chars().take(MAX).collect()
    }
}
