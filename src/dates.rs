use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::DateParseError;

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Convert an ESPN date string to a UTC instant.
///
/// ESPN mostly sends `2025-11-12T18:20Z`, which RFC 3339 rejects for lacking seconds.
/// A trailing `Z` is read as `+00:00` and strings without an offset are taken as UTC.
/// Date and time may be separated by `T` or a space.
pub fn normalize(input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let s = input.trim();
    let s = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    // Date only: midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(DateParseError { input: input.to_string() })
}
