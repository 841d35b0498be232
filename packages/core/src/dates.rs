// ABOUTME: Lenient due-date parsing shared by the API, client and CLI
// ABOUTME: Accepts RFC 3339 date-times as well as bare calendar dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date '{0}': expected an ISO 8601 date-time or YYYY-MM-DD")]
pub struct DateParseError(pub String);

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a due date.
///
/// Full RFC 3339 values keep their instant. Values without an offset
/// (`2025-04-15T09:30`, `2025-04-15`) are read as UTC; a bare date means
/// midnight.
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DateParseError(value.to_string()))
}

/// Serde adapter for required due dates
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for optional due dates; pair with `#[serde(default)]`
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw))
        .transpose()
        .map_err(serde::de::Error::custom)
}
