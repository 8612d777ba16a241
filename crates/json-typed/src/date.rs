//! Date payload rendering and parsing.
//!
//! Dates travel as ISO-8601 strings in the `toISOString` shape:
//! `YYYY-MM-DDTHH:mm:ss.sssZ`, with a signed six-digit year outside
//! 0000..=9999.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value as JsonValue;

use crate::encoded::DATE_TAG;
use crate::error::TypedJsonError;

/// Truncates an instant to millisecond precision.
pub(crate) fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    from_millis(date.timestamp_millis()).unwrap_or(date)
}

pub(crate) fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

pub(crate) fn to_iso_string(date: &DateTime<Utc>) -> String {
    let year = date.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -i64::from(year))
    } else {
        format!("+{year:06}")
    };
    format!("{year}-{}", date.format("%m-%dT%H:%M:%S%.3fZ"))
}

/// Rebuilds a date from a `Date` envelope payload.
pub(crate) fn from_payload(payload: &JsonValue) -> Result<DateTime<Utc>, TypedJsonError> {
    match payload {
        JsonValue::String(text) => parse_iso(text).ok_or_else(|| invalid(format!("`{text}`"))),
        JsonValue::Number(n) => {
            let ms = n
                .as_f64()
                .filter(|ms| ms.is_finite())
                .ok_or_else(|| invalid(format!("timestamp {n}")))?;
            from_millis(ms.trunc() as i64).ok_or_else(|| invalid(format!("timestamp {n}")))
        }
        other => Err(invalid(format!("expected a string or a number, got {other}"))),
    }
}

/// Date-times must carry an offset (`Z` or `±hh:mm`). Offset-less local
/// times have no fixed instant and are rejected; bare dates are UTC midnight.
fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(truncate_to_millis(date.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ") {
        return Some(truncate_to_millis(Utc.from_utc_datetime(&naive)));
    }
    let naive = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&naive.and_hms_opt(0, 0, 0)?))
}

fn invalid(reason: String) -> TypedJsonError {
    TypedJsonError::InvalidPayload {
        tag: DATE_TAG,
        reason,
    }
}
