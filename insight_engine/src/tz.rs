//! Timestamp formatting and parsing for the store's text columns.
//!
//! Insight rows keep timestamps as RFC-3339 UTC text; these helpers are the
//! single conversion point so every column uses the same shape.

use anyhow::Context;
use chrono::{DateTime, Utc};

/// Format a UTC datetime as an RFC-3339 string with millisecond precision.
pub fn to_rfc3339_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// RFC-3339 (any offset) -> UTC.
pub fn parse_ts_to_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s).with_context(|| format!("bad rfc3339: {s}"))?;
    Ok(dt.with_timezone(&Utc))
}
