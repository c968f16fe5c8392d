//! SQLite-backed [`InsightStore`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::insight::{InsightCandidate, InsightType};
use crate::models::{InsightRefresh, InsightRow, NewInsight};
use crate::schema::insights;
use crate::store::{InsightStore, RepoResult, StoreError};
use crate::tz;

use crate::schema::insights::dsl as ins;

/// Insight repository over a SQLite connection.
pub struct SqliteStore;

impl SqliteStore {
    /// Stateless; the connection carries everything.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqliteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightStore for SqliteStore {
    fn find_active(
        &self,
        conn: &mut SqliteConnection,
        shop_id: &str,
        insight_type: InsightType,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<InsightRow>> {
        // Dismissal is filtered in SQL; expiry needs timestamp parsing, so it
        // is checked after load.
        let rows: Vec<InsightRow> = ins::insights
            .filter(ins::shop_id.eq(shop_id))
            .filter(ins::insight_type.eq(insight_type.as_str()))
            .filter(ins::dismissed_at.is_null())
            .order(ins::created_at.desc())
            .select(InsightRow::as_select())
            .load(conn)?;

        Ok(rows.into_iter().find(|row| row.is_active(now)))
    }

    fn create(
        &self,
        conn: &mut SqliteConnection,
        shop_id: &str,
        candidate: &InsightCandidate,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> RepoResult<InsightRow> {
        let payload = serde_json::to_string(&candidate.payload)?;
        let created_at = tz::to_rfc3339_millis(now);
        let expires_at = expires_at.map(tz::to_rfc3339_millis);

        let row = NewInsight {
            shop_id,
            insight_type: candidate.insight_type.as_str(),
            severity: candidate.severity.as_str(),
            title: &candidate.title,
            action_summary: &candidate.action_summary,
            expected_uplift: candidate.expected_uplift.as_deref(),
            confidence: candidate.confidence,
            payload: &payload,
            admin_deep_link: candidate.admin_deep_link.as_deref(),
            created_at: &created_at,
            expires_at: expires_at.as_deref(),
        };

        let inserted = diesel::insert_into(insights::table)
            .values(&row)
            .returning(InsightRow::as_returning())
            .get_result(conn)?;
        Ok(inserted)
    }

    fn update_fields(
        &self,
        conn: &mut SqliteConnection,
        insight_id: i32,
        candidate: &InsightCandidate,
    ) -> RepoResult<InsightRow> {
        let payload = serde_json::to_string(&candidate.payload)?;

        let updated = diesel::update(ins::insights.find(insight_id))
            .set(InsightRefresh {
                severity: candidate.severity.as_str(),
                title: &candidate.title,
                action_summary: &candidate.action_summary,
                expected_uplift: candidate.expected_uplift.as_deref(),
                confidence: candidate.confidence,
                payload: &payload,
                admin_deep_link: candidate.admin_deep_link.as_deref(),
            })
            .returning(InsightRow::as_returning())
            .get_result(conn)
            .optional()?;

        match updated {
            Some(row) => Ok(row),
            None => Err(StoreError::NotFound(insight_id).into()),
        }
    }

    fn dismiss(
        &self,
        conn: &mut SqliteConnection,
        insight_id: i32,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let n = diesel::update(ins::insights.find(insight_id))
            .set(ins::dismissed_at.eq(Some(tz::to_rfc3339_millis(at))))
            .execute(conn)?;
        if n == 0 {
            return Err(StoreError::NotFound(insight_id).into());
        }
        Ok(())
    }

    fn mark_actioned(
        &self,
        conn: &mut SqliteConnection,
        insight_id: i32,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let n = diesel::update(ins::insights.find(insight_id))
            .set(ins::actioned_at.eq(Some(tz::to_rfc3339_millis(at))))
            .execute(conn)?;
        if n == 0 {
            return Err(StoreError::NotFound(insight_id).into());
        }
        Ok(())
    }

    fn list_for_shop(
        &self,
        conn: &mut SqliteConnection,
        shop_id: &str,
    ) -> RepoResult<Vec<InsightRow>> {
        let rows = ins::insights
            .filter(ins::shop_id.eq(shop_id))
            .order(ins::created_at.desc())
            .select(InsightRow::as_select())
            .load(conn)?;
        Ok(rows)
    }
}
