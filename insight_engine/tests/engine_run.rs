mod common;
use common::{count_insights, count_of_type, line, order, product, setup_db};

use anyhow::anyhow;
use chrono::Utc;
use insight_engine::analyzers::{Analyzer, default_analyzers};
use insight_engine::config::EngineConfig;
use insight_engine::engine::{generate_insights, generate_insights_with};
use insight_engine::insight::InsightType;
use insight_engine::store::{InsightStore, SqliteStore};
use shop_data::memory::MemorySource;
use shop_data::models::{Order, Product};

const SHOP: &str = "shop-1";

/// One fast mover with 3 units left: fires understocked_winner,
/// inventory_alert, and pricing_opportunity (100% revenue share).
fn busy_shop() -> (Vec<Product>, Vec<Order>) {
    let products = vec![product("gid://shopify/Product/1", "Best Seller", 3)];
    let orders = (0..10)
        .map(|i| {
            order(
                &format!("o{i}"),
                2 * i,
                false,
                vec![line("gid://shopify/Product/1", 3, 60.0)],
            )
        })
        .collect();
    (products, orders)
}

#[test]
fn first_pass_creates_second_pass_updates_in_place() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let (products, orders) = busy_shop();
    let source = MemorySource::for_shop(SHOP, products, orders);

    let created = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created, 3);
    assert_eq!(count_of_type(&mut conn, "understocked_winner"), 1);
    assert_eq!(count_of_type(&mut conn, "inventory_alert"), 1);
    assert_eq!(count_of_type(&mut conn, "pricing_opportunity"), 1);

    // Idempotent: the second pass refreshes rather than duplicates.
    let created2 = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created2, 0);
    assert_eq!(count_insights(&mut conn), 3);
}

#[test]
fn shop_with_no_orders_creates_nothing() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let source = MemorySource::for_shop(SHOP, vec![product("p1", "Idle", 2)], vec![]);

    let created = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created, 0);
    assert_eq!(count_insights(&mut conn), 0);
}

#[test]
fn shop_with_no_products_creates_nothing() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    // Orders alone could still feed the tally-based rules (coupon overuse,
    // revenue concentration); an empty catalog must short-circuit them all.
    let orders: Vec<Order> = (0..7)
        .map(|i| order(&format!("o{i}"), i, i < 3, vec![line("p1", 2, 50.0)]))
        .collect();
    let source = MemorySource::for_shop(SHOP, vec![], orders);

    let created = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created, 0);
    assert_eq!(count_insights(&mut conn), 0);
}

#[test]
fn source_failure_is_swallowed_and_reports_zero() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    // Shop never registered with the source -> UnknownShop error inside the run.
    let source = MemorySource::new();

    let created = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created, 0);
    assert_eq!(count_insights(&mut conn), 0);
}

#[test]
fn dismissed_insight_is_not_resurrected() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let (products, orders) = busy_shop();
    let source = MemorySource::for_shop(SHOP, products, orders);

    generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    let active = store
        .find_active(&mut conn, SHOP, InsightType::UnderstockedWinner, Utc::now())
        .unwrap()
        .expect("active row after first pass");
    store.dismiss(&mut conn, active.id, Utc::now()).unwrap();

    // Same triggering condition -> a fresh row, not the dismissed one.
    let created = generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    assert_eq!(created, 1);
    assert_eq!(count_of_type(&mut conn, "understocked_winner"), 2);

    let fresh = store
        .find_active(&mut conn, SHOP, InsightType::UnderstockedWinner, Utc::now())
        .unwrap()
        .expect("fresh active row");
    assert_ne!(fresh.id, active.id);
}

#[test]
fn two_understocked_products_resolve_last_write_wins() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let products = vec![product("pa", "Alpha", 2), product("pb", "Beta", 3)];
    let orders = vec![
        order("o1", 10, false, vec![line("pa", 30, 300.0)]),
        order("o2", 9, false, vec![line("pb", 30, 300.0)]),
    ];
    let source = MemorySource::for_shop(SHOP, products, orders);

    generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());

    // Both products qualify, but the single active row holds the candidate
    // reconciled last (pb follows pa in product order).
    assert_eq!(count_of_type(&mut conn, "understocked_winner"), 1);
    let active = store
        .find_active(&mut conn, SHOP, InsightType::UnderstockedWinner, Utc::now())
        .unwrap()
        .unwrap();
    assert_eq!(active.payload_json().unwrap()["product_id"], "pb");
}

#[test]
fn refresh_overwrites_mutable_fields_in_place() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let (products, orders) = busy_shop();
    let source = MemorySource::for_shop(SHOP, products, orders.clone());

    generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    let before = store
        .find_active(&mut conn, SHOP, InsightType::UnderstockedWinner, Utc::now())
        .unwrap()
        .unwrap();
    assert_eq!(before.payload_json().unwrap()["current_inventory"], 3);

    // Inventory dropped since the last sync; same row, fresh numbers.
    let source2 = MemorySource::for_shop(
        SHOP,
        vec![product("gid://shopify/Product/1", "Best Seller", 2)],
        orders,
    );
    let created = generate_insights(&mut conn, &store, &source2, SHOP, &cfg, Utc::now());
    assert_eq!(created, 0);

    let after = store
        .find_active(&mut conn, SHOP, InsightType::UnderstockedWinner, Utc::now())
        .unwrap()
        .unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.payload_json().unwrap()["current_inventory"], 2);
}

struct BrokenAnalyzer;

impl Analyzer for BrokenAnalyzer {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn analyze(
        &self,
        _snap: &insight_engine::snapshot::ShopSnapshot,
        _cfg: &EngineConfig,
    ) -> anyhow::Result<Vec<insight_engine::insight::InsightCandidate>> {
        Err(anyhow!("boom"))
    }
}

#[test]
fn one_failing_analyzer_does_not_suppress_the_rest() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let (products, orders) = busy_shop();
    let source = MemorySource::for_shop(SHOP, products, orders);

    let mut analyzers: Vec<Box<dyn Analyzer>> = vec![Box::new(BrokenAnalyzer)];
    analyzers.extend(default_analyzers());

    let created = generate_insights_with(
        &mut conn,
        &store,
        &source,
        SHOP,
        &cfg,
        Utc::now(),
        &analyzers,
    );
    assert_eq!(created, 3);
}

#[test]
fn repeated_passes_keep_one_active_row_per_type() {
    let (_db, mut conn) = setup_db();
    let store = SqliteStore::new();
    let cfg = EngineConfig::default();
    let (products, orders) = busy_shop();
    let source = MemorySource::for_shop(SHOP, products, orders);

    for _ in 0..4 {
        generate_insights(&mut conn, &store, &source, SHOP, &cfg, Utc::now());
    }

    let rows = store.list_for_shop(&mut conn, SHOP).unwrap();
    let now = Utc::now();
    for ty in ["understocked_winner", "inventory_alert", "pricing_opportunity"] {
        let active = rows
            .iter()
            .filter(|r| r.insight_type == ty && r.is_active(now))
            .count();
        assert_eq!(active, 1, "exactly one active {ty}");
    }
}
