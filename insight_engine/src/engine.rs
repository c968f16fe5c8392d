//! Orchestration: run the analyzers for one shop and reconcile the results.
//!
//! Invoked by the sync pipeline after a data sync lands. Generation is
//! best-effort by contract: any failure outside an individual analyzer is
//! logged and converted into a zero count so the calling sync workflow never
//! breaks on an insight bug. Each analyzer additionally runs inside its own
//! failure boundary so one broken rule cannot suppress the rest.

use chrono::{DateTime, Duration, Utc};
use diesel::SqliteConnection;
use shop_data::source::ShopDataSource;
use tracing::{error, info, warn};

use crate::analyzers::{Analyzer, default_analyzers};
use crate::config::EngineConfig;
use crate::insight::InsightCandidate;
use crate::payload::validate_payload;
use crate::snapshot::ShopSnapshot;
use crate::store::InsightStore;

/// Run the full analyzer set for a shop and reconcile candidates into the
/// store. Returns the number of *newly created* insights (refreshes of
/// existing active rows do not count).
///
/// Never fails: errors are logged and reported as 0.
pub fn generate_insights(
    conn: &mut SqliteConnection,
    store: &dyn InsightStore,
    source: &dyn ShopDataSource,
    shop_id: &str,
    cfg: &EngineConfig,
    now: DateTime<Utc>,
) -> u32 {
    generate_insights_with(conn, store, source, shop_id, cfg, now, &default_analyzers())
}

/// Same as [`generate_insights`] but with an explicit analyzer set.
pub fn generate_insights_with(
    conn: &mut SqliteConnection,
    store: &dyn InsightStore,
    source: &dyn ShopDataSource,
    shop_id: &str,
    cfg: &EngineConfig,
    now: DateTime<Utc>,
    analyzers: &[Box<dyn Analyzer>],
) -> u32 {
    match run(conn, store, source, shop_id, cfg, now, analyzers) {
        Ok(created) => created,
        Err(e) => {
            error!(shop_id, error = %e, "insight generation failed");
            0
        }
    }
}

fn run(
    conn: &mut SqliteConnection,
    store: &dyn InsightStore,
    source: &dyn ShopDataSource,
    shop_id: &str,
    cfg: &EngineConfig,
    now: DateTime<Utc>,
    analyzers: &[Box<dyn Analyzer>],
) -> anyhow::Result<u32> {
    let products = source.products(shop_id)?;
    if products.is_empty() {
        info!(shop_id, "no products to analyze for insights");
        return Ok(0);
    }

    let since = now - Duration::days(cfg.window_days);
    let orders = source.orders_since(shop_id, since)?;
    if orders.is_empty() {
        info!(shop_id, "no orders to analyze for insights");
        return Ok(0);
    }

    let snap = ShopSnapshot::new(products, orders, now);

    let mut created = 0u32;
    for analyzer in analyzers {
        // Per-analyzer failure boundary: one broken rule must not cost the
        // shop the rest of its insights.
        let candidates = match analyzer.analyze(&snap, cfg) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(shop_id, analyzer = analyzer.name(), error = %e, "analyzer failed, skipping");
                continue;
            }
        };

        for candidate in candidates {
            if let Err(e) = validate_payload(candidate.insight_type, &candidate.payload) {
                warn!(shop_id, analyzer = analyzer.name(), error = %e, "candidate payload rejected");
                continue;
            }
            created += reconcile(conn, store, shop_id, &candidate, cfg, now)?;
        }
    }

    info!(shop_id, created, "insight pass complete");
    Ok(created)
}

/// Merge one candidate against the shop's active insight of the same type:
/// refresh in place when one exists, otherwise create. Returns 1 only for a
/// creation, which keeps the at-most-one-active-per-type invariant without a
/// separate dedup pass.
fn reconcile(
    conn: &mut SqliteConnection,
    store: &dyn InsightStore,
    shop_id: &str,
    candidate: &InsightCandidate,
    cfg: &EngineConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<u32> {
    match store.find_active(conn, shop_id, candidate.insight_type, now)? {
        Some(existing) => {
            store.update_fields(conn, existing.id, candidate)?;
            Ok(0)
        }
        None => {
            let expires_at = cfg.expires_after_days.map(|days| now + Duration::days(days));
            store.create(conn, shop_id, candidate, now, expires_at)?;
            Ok(1)
        }
    }
}
