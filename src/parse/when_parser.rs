use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::model::schedule::{Schedule, weekday_from_name};

static DAY_OF_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$").expect("valid day-of-month regex"));

/// Naive date-time layouts tried after RFC 3339.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Classify a raw `when` value.
///
/// Textual forms are checked before date parsing, so `"15"` is a day of the
/// month rather than a year. Unrecognized text is returned as
/// [`Schedule::Opaque`]; this never fails.
pub fn classify(when: Option<&str>) -> Schedule {
    let Some(raw) = when else {
        return Schedule::None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Schedule::None;
    }

    if let Some(days) = parse_weekday_list(trimmed) {
        return Schedule::WeekdaySet(days);
    }

    if DAY_OF_MONTH_RE.is_match(trimmed)
        && let Ok(day) = trimmed.parse::<u8>()
    {
        return Schedule::DayOfMonth(day);
    }

    if let Some(date) = parse_date(trimmed) {
        return Schedule::AbsoluteDate(date);
    }

    Schedule::Opaque(raw.to_string())
}

/// Parse `"Monday"` or `"Monday, Wednesday"`. Every component must be a
/// vocabulary name after trimming; otherwise `None`.
fn parse_weekday_list(s: &str) -> Option<Vec<chrono::Weekday>> {
    s.split(',')
        .map(|part| weekday_from_name(part.trim()))
        .collect()
}

/// Parse a calendar date or timestamp, keeping only the date as written
/// (no timezone conversion).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    None
}
