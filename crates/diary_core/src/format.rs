use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::{DiaryEntry, RawPost};

pub const INVALID_DATE: &str = "Invalid date";
pub const INVALID_TIME: &str = "Invalid time";

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%I:%M %p";

/// Outcome of resolving a configured zone name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneChoice {
    pub zone: Tz,
    /// Set when the configured name was not recognized and UTC is used instead.
    pub fallback: bool,
}

/// Resolves an IANA zone name. Absent or blank names select UTC silently;
/// unknown names select UTC with `fallback` set so the caller can warn.
pub fn resolve_zone(name: Option<&str>) -> ZoneChoice {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => ZoneChoice {
            zone: Tz::UTC,
            fallback: false,
        },
        Some(name) => match name.parse::<Tz>() {
            Ok(zone) => ZoneChoice {
                zone,
                fallback: false,
            },
            Err(_) => ZoneChoice {
                zone: Tz::UTC,
                fallback: true,
            },
        },
    }
}

/// Formats an ISO-8601 timestamp as `(date, time)` in `zone`.
///
/// Timestamps without an offset are taken as UTC.
pub fn format_timestamp(raw: &str, zone: Tz) -> Option<(String, String)> {
    let raw = raw.trim();
    let instant = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .ok()?;
    let local = instant.with_timezone(&zone);
    Some((
        local.format(DATE_FORMAT).to_string(),
        local.format(TIME_FORMAT).to_string(),
    ))
}

/// Builds the entry for an already extracted diary body. A bad timestamp
/// yields the invalid-date sentinels instead of an error.
pub fn format_entry(post: &RawPost, text: &str, zone: Tz) -> DiaryEntry {
    let (date, time) = format_timestamp(&post.created_at, zone)
        .unwrap_or_else(|| (INVALID_DATE.to_string(), INVALID_TIME.to_string()));
    DiaryEntry {
        date,
        time,
        text: text.to_string(),
    }
}
