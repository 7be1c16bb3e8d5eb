use serde::{Deserialize, Serialize};

use super::schedule::DateOrder;

/// Configuration from planner.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file, relative to the planner/ directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_store_file(),
        }
    }
}

fn default_store_file() -> String {
    "categories.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub date_order: DateOrder,
    /// Include done tasks in listings
    #[serde(default = "default_true")]
    pub show_done: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            date_order: DateOrder::default(),
            show_done: true,
        }
    }
}

fn default_true() -> bool {
    true
}
