use serde::Serialize;

use crate::model::category::Category;
use crate::model::palette::color_for_value;
use crate::model::schedule::{DateOrder, Schedule, ScheduleKind};
use crate::model::task::Task;
use crate::ops::schedule_ops::{self, WhenDisplay};
use crate::util::unicode::fit_to_width;

/// Width of the name column in `list` output
const NAME_COLUMN: usize = 32;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct WhenJson {
    pub kind: ScheduleKind,
    pub repeating: bool,
    pub display: String,
    pub shown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
}

#[derive(Serialize)]
pub struct TodayJson {
    pub date: String,
    pub tasks: Vec<TodayTaskJson>,
}

#[derive(Serialize)]
pub struct TodayTaskJson {
    pub category_id: String,
    pub category: String,
    pub task_id: String,
    pub name: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Serialize)]
pub struct ColorJson {
    pub name: &'static str,
    pub value: &'static str,
    pub border: &'static str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn when_to_json(raw: &str, order: DateOrder) -> WhenJson {
    let schedule = crate::parse::classify(Some(raw));
    let WhenDisplay { text, show } = schedule_ops::format_for_display(Some(raw), order);
    let mut json = WhenJson {
        kind: schedule.kind(),
        repeating: schedule.is_repeating(),
        display: text,
        shown: show,
        date: None,
        weekdays: Vec::new(),
        day_of_month: None,
    };
    match schedule {
        Schedule::AbsoluteDate(d) => json.date = Some(d.format("%Y-%m-%d").to_string()),
        Schedule::WeekdaySet(days) => {
            json.weekdays = days
                .into_iter()
                .map(|d| crate::model::schedule::weekday_name(d).to_string())
                .collect()
        }
        Schedule::DayOfMonth(n) => json.day_of_month = Some(n),
        Schedule::None | Schedule::Opaque(_) => {}
    }
    json
}

pub fn today_task_to_json(category: &Category, task: &Task, order: DateOrder) -> TodayTaskJson {
    TodayTaskJson {
        category_id: category.id.clone(),
        category: category.name.clone(),
        task_id: task.id.clone(),
        name: task.name.clone(),
        done: task.done,
        subtitle: schedule_ops::subtitle(task, order),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// First eight characters of an id, enough to type back as a prefix
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

fn check_char(done: bool) -> char {
    if done { 'x' } else { ' ' }
}

fn color_name(category: &Category) -> &'static str {
    category
        .color_value
        .as_deref()
        .and_then(color_for_value)
        .map(|c| c.name)
        .unwrap_or("?")
}

/// Format a category header line for `list`
pub fn format_category_line(category: &Category) -> String {
    format!(
        "[{}] {} {} ({}/{} done, {})",
        check_char(category.is_marked_done),
        short_id(&category.id),
        category.name,
        category.done_count(),
        category.tasks.len(),
        color_name(category),
    )
}

/// Format a task as one line: checkbox, id, name, and the subtitle if any
pub fn format_task_line(task: &Task, order: DateOrder) -> String {
    let repeat = if task.can_be_repeated { " \u{21bb}" } else { "" };
    let head = format!("[{}] {} {}{}", check_char(task.done), short_id(&task.id), task.name, repeat);
    match schedule_ops::subtitle(task, order) {
        Some(sub) => format!("{}  {}", fit_to_width(&head, NAME_COLUMN), sub),
        None => head,
    }
}

/// Format a category with its tasks, indented
pub fn format_category_listing(category: &Category, order: DateOrder, show_done: bool) -> Vec<String> {
    let mut lines = vec![format_category_line(category)];
    for task in category.tasks.iter().filter(|t| show_done || !t.done) {
        lines.push(format!("  {}", format_task_line(task, order)));
    }
    lines
}

/// Format detailed category view
pub fn format_category_detail(category: &Category, order: DateOrder) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("[{}] {}", check_char(category.is_marked_done), category.name));
    lines.push(format!("id: {}", category.id));
    if let Some(p) = category.priority {
        lines.push(format!("priority: {}", p));
    }
    lines.push(format!("color: {}", color_name(category)));

    if category.tasks.is_empty() {
        lines.push("tasks: none".to_string());
        return lines;
    }
    lines.push(format!("tasks ({}/{} done):", category.done_count(), category.tasks.len()));
    for task in &category.tasks {
        let prio = task.priority.map(|p| format!("{:>3}. ", p)).unwrap_or_default();
        lines.push(format!("  {}{}", prio, format_task_line(task, order)));
        if let Some(when) = task.when.as_deref()
            && task.schedule().is_repeating()
        {
            lines.push(format!("       repeats: {}", when));
        }
    }
    lines
}

/// One-line summary of a write: what changed, what was deleted
pub fn format_change_summary(patch: &[Category], deleted: &[String]) -> Vec<String> {
    if patch.is_empty() && deleted.is_empty() {
        return vec!["no changes".to_string()];
    }
    let mut lines = Vec::new();
    if !patch.is_empty() {
        let names: Vec<&str> = patch.iter().map(|c| c.name.as_str()).collect();
        lines.push(format!("changed {}: {}", patch.len(), names.join(", ")));
    }
    if !deleted.is_empty() {
        let ids: Vec<&str> = deleted.iter().map(|d| short_id(d)).collect();
        lines.push(format!("deleted {}: {}", deleted.len(), ids.join(", ")));
    }
    lines
}
