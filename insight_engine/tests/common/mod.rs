#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{Duration, Utc};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use insight_engine::db::{connection, migrate};
use shop_data::models::{DiscountCode, LineItem, Order, Product, ProductStatus};
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_all(&path).expect("migrations");
    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub fn count_insights(conn: &mut SqliteConnection) -> i64 {
    let row: CountRow = diesel::sql_query("SELECT COUNT(*) AS n FROM insights")
        .get_result(conn)
        .unwrap();
    row.n
}

pub fn count_of_type(conn: &mut SqliteConnection, insight_type: &str) -> i64 {
    let row: CountRow =
        diesel::sql_query("SELECT COUNT(*) AS n FROM insights WHERE insight_type = ?")
            .bind::<diesel::sql_types::Text, _>(insight_type)
            .get_result(conn)
            .unwrap();
    row.n
}

// ---- fixture builders ----

pub fn product(id: &str, title: &str, inventory: i64) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        status: ProductStatus::Active,
        total_inventory: inventory,
        inventory_tracked: true,
    }
}

pub fn line(product_id: &str, qty: i64, amount: f64) -> LineItem {
    LineItem {
        product_id: Some(product_id.to_string()),
        title: format!("title of {product_id}"),
        quantity: qty,
        amount,
    }
}

pub fn order(id: &str, age_days: i64, discounted: bool, items: Vec<LineItem>) -> Order {
    let total = items.iter().map(|i| i.amount).sum();
    Order {
        id: id.to_string(),
        processed_at: Utc::now() - Duration::days(age_days),
        total_price: total,
        line_items: items,
        discount_codes: if discounted {
            vec![DiscountCode {
                code: "TEST".to_string(),
            }]
        } else {
            vec![]
        },
    }
}
