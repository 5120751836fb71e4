//! Time utilities for SSSA.
//!
//! All persisted timestamps are RFC 3339 strings in UTC.

use chrono::{DateTime, Utc};

/// Return the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse an RFC 3339 string, returning `None` when malformed.
pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Hours elapsed between `timestamp` and `now` (negative if in the future).
pub fn hours_between(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> f64 {
    (*now - *timestamp).num_seconds() as f64 / 3600.0
}
