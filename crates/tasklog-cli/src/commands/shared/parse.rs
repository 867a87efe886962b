use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::de::DeserializeOwned;

/// Parse an enum value through its serde representation.
///
/// Accepts both `in-progress` and `in_progress` spellings.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let raw_lower = raw.trim().to_lowercase();
    let attempt = |value: &str| serde_json::from_value::<T>(serde_json::Value::from(value));

    attempt(&raw_lower)
        .or_else(|_| attempt(&raw_lower.replace('_', "-")))
        .or_else(|_| attempt(&raw_lower.replace('-', "_")))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an RFC 3339 timestamp, or a `YYYY-MM-DD` date taken as local midnight.
pub fn parse_time(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD")
        })
}
