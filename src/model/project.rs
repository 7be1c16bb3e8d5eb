use std::path::PathBuf;

use super::category::Category;
use super::config::ProjectConfig;

/// A loaded planner project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory (parent of planner/)
    pub root: PathBuf,
    /// The planner/ directory
    pub planner_dir: PathBuf,
    pub config: ProjectConfig,
    /// Categories sorted by priority, each with tasks sorted by priority
    pub categories: Vec<Category>,
}

impl Project {
    /// Path of the snapshot file
    pub fn store_path(&self) -> PathBuf {
        self.planner_dir.join(&self.config.store.file)
    }
}
