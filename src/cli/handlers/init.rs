use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::project_io::{self, CONFIG_FILE, PLANNER_DIR};
use crate::model::config::StoreConfig;

const CONFIG_TEMPLATE: &str = r##"[project]
name = "{name}"

[store]
# Snapshot of the category collection, relative to this directory
file = "{file}"

[display]
# "day-month" (01/03 for 1 March) or "month-day" (03/01)
date_order = "day-month"
# Include done tasks in `vp list`
show_done = true
"##;

const EMPTY_SNAPSHOT: &str = "[]\n";

/// Infer a project name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_config(name: &str, file: &str) -> String {
    let name = name.replace('\\', "\\\\").replace('"', "\\\"");
    CONFIG_TEMPLATE.replace("{name}", &name).replace("{file}", file)
}

pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let planner_dir = dir.join(PLANNER_DIR);

    if planner_dir.join(CONFIG_FILE).exists() && !args.force {
        return Err(format!(
            "planner project already exists in {}/ (use --force to reinitialize)",
            planner_dir.display()
        )
        .into());
    }

    if let Some(parent) = dir.parent()
        && let Ok(parent_root) = project_io::discover_project(parent)
    {
        eprintln!(
            "Note: parent project found at {}/",
            parent_root.join(PLANNER_DIR).display()
        );
    }

    let name = match args.name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        Some(_) => return Err("project name cannot be empty".into()),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Untitled".to_string()),
    };
    let file = StoreConfig::default().file;

    fs::create_dir_all(&planner_dir)?;
    project_io::atomic_write(&planner_dir.join(CONFIG_FILE), render_config(&name, &file).as_bytes())?;

    // Keep existing data on --force
    let snapshot = planner_dir.join(&file);
    if !snapshot.exists() {
        project_io::atomic_write(&snapshot, EMPTY_SNAPSHOT.as_bytes())?;
    }
    tracing::info!(dir = %planner_dir.display(), "project initialized");

    println!("Initialized planner project: {}", name);
    Ok(())
}
