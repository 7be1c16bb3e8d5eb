use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekday names accepted in a `when` value, Monday first.
/// Matching is exact and case-sensitive.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse an exact weekday name from [`WEEKDAY_NAMES`].
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "Monday" => Some(Weekday::Mon),
        "Tuesday" => Some(Weekday::Tue),
        "Wednesday" => Some(Weekday::Wed),
        "Thursday" => Some(Weekday::Thu),
        "Friday" => Some(Weekday::Fri),
        "Saturday" => Some(Weekday::Sat),
        "Sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// What a task's `when` value means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// No value, or only whitespace
    None,
    /// A one-off calendar date (timestamps are reduced to their date part)
    AbsoluteDate(NaiveDate),
    /// One or more weekday names, in the order written
    WeekdaySet(Vec<Weekday>),
    /// One or two digits, read as a day of the month
    DayOfMonth(u8),
    /// Anything else; shown as written
    Opaque(String),
}

/// The variant of a [`Schedule`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleKind {
    None,
    AbsoluteDate,
    WeekdaySet,
    DayOfMonth,
    Opaque,
}

impl Schedule {
    pub fn kind(&self) -> ScheduleKind {
        match self {
            Schedule::None => ScheduleKind::None,
            Schedule::AbsoluteDate(_) => ScheduleKind::AbsoluteDate,
            Schedule::WeekdaySet(_) => ScheduleKind::WeekdaySet,
            Schedule::DayOfMonth(_) => ScheduleKind::DayOfMonth,
            Schedule::Opaque(_) => ScheduleKind::Opaque,
        }
    }

    /// True for the weekday and day-of-month forms.
    pub fn is_repeating(&self) -> bool {
        matches!(self, Schedule::WeekdaySet(_) | Schedule::DayOfMonth(_))
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::None => write!(f, "none"),
            ScheduleKind::AbsoluteDate => write!(f, "absolute-date"),
            ScheduleKind::WeekdaySet => write!(f, "weekday-set"),
            ScheduleKind::DayOfMonth => write!(f, "day-of-month"),
            ScheduleKind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Numeric month/day convention for rendering absolute dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `01/03` for 1 March
    #[default]
    DayMonth,
    /// `03/01` for 1 March
    MonthDay,
}

impl DateOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day-month" => Some(DateOrder::DayMonth),
            "month-day" => Some(DateOrder::MonthDay),
            _ => None,
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DateOrder::DayMonth => date.format("%d/%m").to_string(),
            DateOrder::MonthDay => date.format("%m/%d").to_string(),
        }
    }
}
