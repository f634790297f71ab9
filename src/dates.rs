//! Parsing of user-supplied dates and UTC day boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Which end of a day a date-only value should snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of the day, so inclusive range queries cover the whole day.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Years we accept. Stored timestamps are compared as text, which only
/// orders correctly for four-digit years.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parses an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC) or a bare `YYYY-MM-DD`, which snaps to `bound` of that day. Values
/// whose UTC year falls outside `SUPPORTED_YEARS` are rejected.
pub fn parse_timestamp(raw: &str, bound: Bound) -> Option<DateTime<Utc>> {
    parse_any(raw.trim(), bound).filter(|dt| SUPPORTED_YEARS.contains(&dt.year()))
}

fn parse_any(raw: &str, bound: Bound) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| match bound {
            Bound::Start => start_of_day(date),
            Bound::End => end_of_day(date),
        })
}

/// The UTC calendar day a user-supplied date or timestamp falls on.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw, Bound::Start).map(|dt| dt.date_naive())
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
