use std::fs;
use std::path::Path;

use crate::io::project_io::{CONFIG_FILE, ProjectError, atomic_write};
use crate::model::config::ProjectConfig;
use crate::model::schedule::DateOrder;

/// Keys accepted by [`set_config_value`]
pub const EDITABLE_KEYS: [&str; 4] = [
    "project.name",
    "store.file",
    "display.date_order",
    "display.show_done",
];

/// Read the project config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(planner_dir: &Path) -> Result<(ProjectConfig, toml_edit::DocumentMut), ProjectError> {
    let config_path = planner_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| ProjectError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: ProjectConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(planner_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ProjectError> {
    let config_path = planner_dir.join(CONFIG_FILE);
    atomic_write(&config_path, doc.to_string().as_bytes()).map_err(|e| ProjectError::WriteError {
        path: config_path,
        source: e,
    })
}

/// Set a dotted key such as `display.date_order`. Values are validated
/// against the key's type before the document is touched.
pub fn set_config_value(doc: &mut toml_edit::DocumentMut, key: &str, value: &str) -> Result<(), String> {
    let (table, field) = key
        .split_once('.')
        .filter(|_| EDITABLE_KEYS.contains(&key))
        .ok_or_else(|| format!("unknown config key '{}' (expected one of: {})", key, EDITABLE_KEYS.join(", ")))?;

    let item = match key {
        "display.date_order" => {
            DateOrder::parse(value)
                .ok_or_else(|| format!("invalid date_order '{}' (use day-month or month-day)", value))?;
            toml_edit::value(value)
        }
        "display.show_done" => {
            let b: bool = value
                .parse()
                .map_err(|_| format!("invalid boolean '{}' (use true or false)", value))?;
            toml_edit::value(b)
        }
        _ => {
            if value.trim().is_empty() {
                return Err(format!("{} cannot be empty", key));
            }
            toml_edit::value(value)
        }
    };

    if !doc.contains_key(table) {
        doc[table] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[table][field] = item;
    Ok(())
}
