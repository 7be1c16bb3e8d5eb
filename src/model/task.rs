use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::schedule::Schedule;
use crate::parse::classify;

/// A task owned by a category, in the backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier, unique within the owning category
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub can_be_repeated: bool,
    /// Raw schedule value: an absolute timestamp, weekday names, or a day of month.
    /// Interpret with [`Task::schedule`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// 1-based display rank within the owning category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Backend fields this crate does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            name: name.into(),
            notes: None,
            done: false,
            can_be_repeated: false,
            when: None,
            priority: None,
            extra: Map::new(),
        }
    }

    /// Classify the raw `when` value.
    pub fn schedule(&self) -> Schedule {
        classify(self.when.as_deref())
    }

    /// Notes, if present and not blank.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Fields for a task about to be inserted.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    /// Explicit id; generated when absent
    pub id: Option<String>,
    pub name: String,
    pub notes: Option<String>,
    /// Defaults to `false`
    pub done: Option<bool>,
    pub can_be_repeated: bool,
    pub when: Option<String>,
}

/// A partial edit of an existing task. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub name: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub can_be_repeated: Option<bool>,
    /// `Some(None)` clears the schedule
    pub when: Option<Option<String>>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.notes.is_none()
            && self.can_be_repeated.is_none()
            && self.when.is_none()
    }
}
