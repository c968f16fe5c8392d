//! Diesel models mapping to the insight store schema.
//!
//! These types mirror the `insights` table defined in the embedded
//! migrations and in [`crate::schema`]:
//! - [`InsightRow`] — SELECT/UPDATE shape (Queryable, Identifiable, Selectable)
//! - [`NewInsight`] — INSERT shape
//! - [`InsightRefresh`] — the mutable-field changeset reconciliation applies
//!   when a candidate refreshes an existing active row
//!
//! Timestamps are RFC-3339 UTC text (see [`crate::tz`]); enum columns store
//! the stable text forms from [`crate::insight`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::insight::{InsightType, ParseEnumError, Severity};
use crate::schema::insights;

/// A persisted insight row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = insights, check_for_backend(diesel::sqlite::Sqlite))]
pub struct InsightRow {
    /// Database primary key.
    pub id: i32,
    /// Owning shop.
    pub shop_id: String,
    /// Stable text form of [`InsightType`].
    pub insight_type: String,
    /// Stable text form of [`Severity`].
    pub severity: String,
    /// Dashboard headline.
    pub title: String,
    /// Recommendation text.
    pub action_summary: String,
    /// Optional expected-benefit text.
    pub expected_uplift: Option<String>,
    /// Hand-tuned confidence in \[0, 1\].
    pub confidence: f64,
    /// Supporting metrics as serialized JSON.
    pub payload: String,
    /// Optional Shopify-admin path.
    pub admin_deep_link: Option<String>,
    /// Set when the merchant dismissed the insight (RFC3339 UTC); terminal.
    pub dismissed_at: Option<String>,
    /// Set when the merchant acted on it; does not end the lifecycle.
    pub actioned_at: Option<String>,
    /// Row creation timestamp (RFC3339 UTC).
    pub created_at: String,
    /// Optional expiry timestamp (RFC3339 UTC); past expiry means inactive.
    pub expires_at: Option<String>,
}

impl InsightRow {
    /// Decode the stored insight type.
    pub fn insight_type(&self) -> Result<InsightType, ParseEnumError> {
        self.insight_type.parse()
    }

    /// Decode the stored severity.
    pub fn severity(&self) -> Result<Severity, ParseEnumError> {
        self.severity.parse()
    }

    /// Parse the payload column back into JSON.
    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.payload)
    }

    /// Derived activity: not dismissed and not past `expires_at` as of `now`.
    ///
    /// An unparsable `expires_at` counts as expired rather than immortal.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if self.dismissed_at.is_some() {
            return false;
        }
        match &self.expires_at {
            None => true,
            Some(raw) => match crate::tz::parse_ts_to_utc(raw) {
                Ok(expiry) => expiry > now,
                Err(_) => false,
            },
        }
    }
}

/// Insertable form of [`InsightRow`] for creating new rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = insights)]
pub struct NewInsight<'a> {
    /// Owning shop.
    pub shop_id: &'a str,
    /// Stable text form of [`InsightType`].
    pub insight_type: &'a str,
    /// Stable text form of [`Severity`].
    pub severity: &'a str,
    /// Dashboard headline.
    pub title: &'a str,
    /// Recommendation text.
    pub action_summary: &'a str,
    /// Optional expected-benefit text.
    pub expected_uplift: Option<&'a str>,
    /// Hand-tuned confidence in \[0, 1\].
    pub confidence: f64,
    /// Supporting metrics as serialized JSON.
    pub payload: &'a str,
    /// Optional Shopify-admin path.
    pub admin_deep_link: Option<&'a str>,
    /// Row creation timestamp (RFC3339 UTC).
    pub created_at: &'a str,
    /// Optional expiry timestamp (RFC3339 UTC).
    pub expires_at: Option<&'a str>,
}

/// Mutable fields reconciliation overwrites on an existing active row.
///
/// Lifecycle columns (`dismissed_at`, `actioned_at`, `created_at`,
/// `expires_at`) are deliberately absent: a refresh never changes them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = insights, treat_none_as_null = true)]
pub struct InsightRefresh<'a> {
    /// Stable text form of [`Severity`].
    pub severity: &'a str,
    /// Dashboard headline.
    pub title: &'a str,
    /// Recommendation text.
    pub action_summary: &'a str,
    /// Optional expected-benefit text.
    pub expected_uplift: Option<&'a str>,
    /// Hand-tuned confidence in \[0, 1\].
    pub confidence: f64,
    /// Supporting metrics as serialized JSON.
    pub payload: &'a str,
    /// Optional Shopify-admin path.
    pub admin_deep_link: Option<&'a str>,
}
