// Timestamp parsing shared by the loader and the query boundary
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which side of a date range a date-only value stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdge {
    Start,
    End,
}

/// Parse a timestamp in any of the supported layouts.
///
/// Zoned values are converted to UTC and the zone dropped. A bare date is
/// midnight of that day.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_datetime(raw.trim()).or_else(|| {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}

/// Parse a date-picker value. A bare date on the `End` edge covers the whole
/// day, so it resolves to 23:59:59.
pub fn parse_range_edge(raw: &str, edge: RangeEdge) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Some(ts) = parse_datetime(raw) {
        return Some(ts);
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    match edge {
        RangeEdge::Start => Some(date.and_time(NaiveTime::MIN)),
        RangeEdge::End => date.and_hms_opt(23, 59, 59),
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
