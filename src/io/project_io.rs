use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::category::Category;
use crate::model::config::ProjectConfig;
use crate::model::project::Project;
use crate::ops::priority::sort_by_priority;

/// Name of the directory that marks a project root
pub const PLANNER_DIR: &str = "planner";
/// Config file inside the planner directory
pub const CONFIG_FILE: &str = "planner.toml";

/// Error type for project I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("not a planner project: no planner/ directory found")]
    NotAProject,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse planner.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not edit planner.toml: {0}")]
    ConfigEditError(#[from] toml_edit::TomlError),
    #[error("invalid snapshot {path}: {source}")]
    SnapshotError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the project by walking up from the given directory, looking for
/// a `planner/` subdirectory that holds a `planner.toml`.
pub fn discover_project(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = start.to_path_buf();
    loop {
        let planner_dir = current.join(PLANNER_DIR);
        if planner_dir.is_dir() && planner_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::NotAProject);
        }
    }
}

/// Load a project: config plus the category snapshot, sorted by priority.
/// A missing snapshot file is an empty collection.
pub fn load_project(root: &Path) -> Result<Project, ProjectError> {
    let planner_dir = root.join(PLANNER_DIR);
    if !planner_dir.is_dir() {
        return Err(ProjectError::NotAProject);
    }

    let (config, _doc) = crate::io::config_io::read_config(&planner_dir)?;
    let store_path = planner_dir.join(&config.store.file);
    let categories = if store_path.exists() {
        sort_collection(read_snapshot(&store_path)?)
    } else {
        tracing::debug!(path = %store_path.display(), "no snapshot yet");
        Vec::new()
    };

    Ok(Project {
        root: root.to_path_buf(),
        planner_dir,
        config,
        categories,
    })
}

/// Sort categories by priority and each category's tasks by priority.
pub fn sort_collection(categories: Vec<Category>) -> Vec<Category> {
    sort_by_priority(categories)
        .into_iter()
        .map(|mut c| {
            c.tasks = sort_by_priority(std::mem::take(&mut c.tasks));
            c
        })
        .collect()
}

/// Read a JSON array of categories, as returned by the backend.
pub fn read_snapshot(path: &Path) -> Result<Vec<Category>, ProjectError> {
    let text = fs::read_to_string(path).map_err(|e| ProjectError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let categories: Vec<Category> =
        serde_json::from_str(&text).map_err(|e| ProjectError::SnapshotError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(path = %path.display(), count = categories.len(), "snapshot loaded");
    Ok(categories)
}

/// Write a category collection to disk atomically.
pub fn write_snapshot(path: &Path, categories: &[Category]) -> Result<(), ProjectError> {
    let mut content = serde_json::to_string_pretty(categories).map_err(|e| ProjectError::SnapshotError {
        path: path.to_path_buf(),
        source: e,
    })?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| ProjectError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), count = categories.len(), "snapshot written");
    Ok(())
}

/// Save the project's categories back to its snapshot file.
pub fn save_categories(project: &Project) -> Result<(), ProjectError> {
    write_snapshot(&project.store_path(), &project.categories)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
