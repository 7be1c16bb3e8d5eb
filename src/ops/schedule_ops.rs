use chrono::{Datelike, NaiveDate, NaiveTime, SecondsFormat, Weekday};

use crate::model::schedule::{DateOrder, Schedule, weekday_from_name, weekday_name};
use crate::model::task::Task;
use crate::parse::classify;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("unknown weekday: {0:?} (expected one of Monday..Sunday)")]
    UnknownWeekday(String),
    #[error("day of month must be between 1 and 31, got {0}")]
    DayOutOfRange(u32),
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// How a `when` value appears in a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenDisplay {
    pub text: String,
    pub show: bool,
}

/// Render a `when` value for a list row.
///
/// Absolute dates drop the year. Weekday sets and days of the month are
/// hidden: the repeat marker already conveys them.
pub fn format_for_display(when: Option<&str>, order: DateOrder) -> WhenDisplay {
    match classify(when) {
        Schedule::None => WhenDisplay {
            text: String::new(),
            show: false,
        },
        Schedule::AbsoluteDate(date) => WhenDisplay {
            text: order.format(date),
            show: true,
        },
        Schedule::WeekdaySet(_) | Schedule::DayOfMonth(_) => WhenDisplay {
            text: when.unwrap_or_default().trim().to_string(),
            show: false,
        },
        Schedule::Opaque(text) => WhenDisplay { text, show: true },
    }
}

/// Secondary line under a task name: the shown `when` text and the notes,
/// joined by `", "`. `None` when neither is shown.
pub fn subtitle(task: &Task, order: DateOrder) -> Option<String> {
    let when = format_for_display(task.when.as_deref(), order);
    let parts: Vec<&str> = [
        when.show.then_some(when.text.as_str()),
        task.notes_text(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Encode a date as the timestamp string the backend stores (UTC midnight).
pub fn date_to_when(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a `when` value from form input.
///
/// Not repeating: the chosen date, or nothing. Repeating: weekdays joined by
/// `,` (duplicates dropped), else the day of month, else nothing. Weekdays
/// win over a day of month. Names outside the vocabulary are rejected.
pub fn build_when<S: AsRef<str>>(
    can_be_repeated: bool,
    date: Option<NaiveDate>,
    weekdays: &[S],
    day_of_month: Option<u32>,
) -> Result<Option<String>, ScheduleError> {
    if !can_be_repeated {
        return Ok(date.map(date_to_when));
    }

    let mut days: Vec<Weekday> = Vec::new();
    for name in weekdays {
        let name = name.as_ref();
        let day = weekday_from_name(name).ok_or_else(|| ScheduleError::UnknownWeekday(name.to_string()))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if !days.is_empty() {
        let names: Vec<&str> = days.into_iter().map(weekday_name).collect();
        return Ok(Some(names.join(",")));
    }

    match day_of_month {
        Some(day) if (1..=31).contains(&day) => Ok(Some(day.to_string())),
        Some(day) => Err(ScheduleError::DayOutOfRange(day)),
        None => Ok(None),
    }
}

/// Repeat choices while a task is being edited. Weekdays and a day of month
/// are mutually exclusive: choosing one clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatSelection {
    weekdays: Vec<Weekday>,
    day_of_month: Option<u32>,
}

impl RepeatSelection {
    /// Seed the selection from a stored `when`. A day of month in 1..=31
    /// wins; otherwise the valid weekday names are kept.
    pub fn from_when(when: Option<&str>) -> Self {
        match classify(when) {
            Schedule::DayOfMonth(day) if (1..=31).contains(&day) => RepeatSelection {
                weekdays: Vec::new(),
                day_of_month: Some(u32::from(day)),
            },
            Schedule::WeekdaySet(days) => {
                let mut selection = RepeatSelection::default();
                for day in days {
                    if !selection.weekdays.contains(&day) {
                        selection.weekdays.push(day);
                    }
                }
                selection
            }
            Schedule::Opaque(text) if text.contains(',') => RepeatSelection {
                weekdays: text.split(',').map(str::trim).filter_map(weekday_from_name).collect(),
                day_of_month: None,
            },
            _ => RepeatSelection::default(),
        }
    }

    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    pub fn day_of_month(&self) -> Option<u32> {
        self.day_of_month
    }

    /// Add or remove a weekday; clears the day of month.
    pub fn toggle_weekday(&mut self, day: Weekday) {
        if let Some(pos) = self.weekdays.iter().position(|d| *d == day) {
            self.weekdays.remove(pos);
        } else {
            self.weekdays.push(day);
        }
        self.day_of_month = None;
    }

    /// Pick a day of month; clears the weekdays.
    pub fn select_day_of_month(&mut self, day: u32) -> Result<(), ScheduleError> {
        if !(1..=31).contains(&day) {
            return Err(ScheduleError::DayOutOfRange(day));
        }
        self.day_of_month = Some(day);
        self.weekdays.clear();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.weekdays.clear();
        self.day_of_month = None;
    }

    /// The `when` value for a repeating task.
    pub fn to_when(&self) -> Option<String> {
        if !self.weekdays.is_empty() {
            let names: Vec<&str> = self.weekdays.iter().map(|d| weekday_name(*d)).collect();
            return Some(names.join(","));
        }
        self.day_of_month.map(|d| d.to_string())
    }
}

// ---------------------------------------------------------------------------
// Occurrence
// ---------------------------------------------------------------------------

/// Whether a schedule falls on `date`.
pub fn occurs_on(schedule: &Schedule, date: NaiveDate) -> bool {
    match schedule {
        Schedule::AbsoluteDate(d) => *d == date,
        Schedule::WeekdaySet(days) => days.contains(&date.weekday()),
        Schedule::DayOfMonth(day) => u32::from(*day) == date.day(),
        Schedule::None | Schedule::Opaque(_) => false,
    }
}
