use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::palette::PaletteColor;
use super::task::Task;

/// A category and the tasks it owns, in the backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier, unique within the collection
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub is_marked_done: bool,
    /// 1-based display rank within the full category list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_value: Option<String>,
    #[serde(default, alias = "borderColor", skip_serializing_if = "Option::is_none")]
    pub color_border: Option<String>,
    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Backend fields this crate does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            is_marked_done: false,
            priority: None,
            color_value: None,
            color_border: None,
            tasks: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Apply a palette color to both the fill and border fields.
    pub fn set_color(&mut self, color: &PaletteColor) {
        self.color_value = Some(color.value.to_string());
        self.color_border = Some(color.border.to_string());
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Count of tasks marked done
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }
}

/// Fields for a category about to be created.
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    /// Explicit id; generated when absent
    pub id: Option<String>,
    pub name: String,
    /// Palette color name; defaults to the first palette entry
    pub color: Option<String>,
}

/// A partial edit of an existing category. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    /// Palette color name
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::palette::find_color;

    #[test]
    fn test_deserialize_with_nested_tasks() {
        let json = r#"{
            "_id": "c1",
            "name": "Paris",
            "isMarkedDone": false,
            "priority": 1,
            "colorValue": "rgba(33, 150, 243, 0.3)",
            "colorBorder": "rgba(33, 150, 243, 0.8)",
            "tasks": [{"_id": "t1", "name": "Louvre", "priority": 1}]
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Paris");
        assert_eq!(category.tasks.len(), 1);
        assert_eq!(category.tasks[0].name, "Louvre");
        assert!(category.extra.is_empty());
    }

    #[test]
    fn test_legacy_color_keys_accepted() {
        let json = r#"{
            "_id": "c1",
            "name": "Paris",
            "backgroundColor": "a",
            "borderColor": "b"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.color_value.as_deref(), Some("a"));
        assert_eq!(category.color_border.as_deref(), Some("b"));
        let back = serde_json::to_value(&category).unwrap();
        assert_eq!(back["colorValue"], "a");
        assert!(back.get("backgroundColor").is_none());
    }

    #[test]
    fn test_set_color_from_palette() {
        let mut category = Category::new("c1", "Paris");
        category.set_color(find_color("teal").unwrap());
        assert_eq!(
            category.color_value.as_deref(),
            Some("rgba(0, 150, 136, 0.3)")
        );
        assert_eq!(
            category.color_border.as_deref(),
            Some("rgba(0, 150, 136, 0.8)")
        );
    }
}
