//! Lenient date handling for request payloads.
//!
//! Clients send either a calendar date (`2024-05-01`) or a full RFC 3339
//! timestamp (`2024-05-01T00:00:00Z`). Only the date part is kept.

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer};

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a date
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| {
            format!(
                "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
                input
            )
        })
}

/// `deserialize_with` helper for required date fields
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(de::Error::custom)
}

/// `deserialize_with` helper for optional date fields; empty strings count as absent
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw).map(Some).map_err(de::Error::custom),
    }
}
