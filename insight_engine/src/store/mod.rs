//! Insight store (SQLite implementation lives in `repo.rs`).
//!
//! The store is deliberately small: reconciliation only ever looks up the
//! active row for a (shop, type), refreshes it in place, or creates a new
//! one. Dismissal and "actioned" marks come from user actions outside the
//! engine; nothing here deletes rows.

use chrono::{DateTime, Utc};

use crate::insight::{InsightCandidate, InsightType};
use crate::models::InsightRow;

mod repo;

pub use repo::SqliteStore;

#[derive(thiserror::Error, Debug)]
/// Errors specific to insight-store operations.
pub enum StoreError {
    /// The referenced insight row does not exist.
    #[error("insight {0} not found")]
    NotFound(i32),
}

/// Result type used throughout the insight store for fallible operations.
pub type RepoResult<T> = anyhow::Result<T>;

/// Portable persistence surface for insight rows.
pub trait InsightStore {
    /// The single active (not dismissed, not expired as of `now`) insight of
    /// the given type for a shop, when one exists.
    fn find_active(
        &self,
        conn: &mut diesel::SqliteConnection,
        shop_id: &str,
        insight_type: InsightType,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<InsightRow>>;

    /// Persist a candidate as a new row created at `now`, optionally with an
    /// expiry timestamp.
    fn create(
        &self,
        conn: &mut diesel::SqliteConnection,
        shop_id: &str,
        candidate: &InsightCandidate,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> RepoResult<InsightRow>;

    /// Overwrite the mutable fields of an existing row with fresh candidate
    /// data, leaving lifecycle columns untouched.
    fn update_fields(
        &self,
        conn: &mut diesel::SqliteConnection,
        insight_id: i32,
        candidate: &InsightCandidate,
    ) -> RepoResult<InsightRow>;

    /// Mark a row dismissed at `at`; terminal, the row never reactivates.
    fn dismiss(
        &self,
        conn: &mut diesel::SqliteConnection,
        insight_id: i32,
        at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Record that the merchant acted on the insight; the row stays active.
    fn mark_actioned(
        &self,
        conn: &mut diesel::SqliteConnection,
        insight_id: i32,
        at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// All rows for a shop, newest first (dashboard read path).
    fn list_for_shop(
        &self,
        conn: &mut diesel::SqliteConnection,
        shop_id: &str,
    ) -> RepoResult<Vec<InsightRow>>;
}
