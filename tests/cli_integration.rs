//! Integration tests for the `vp` CLI.
//!
//! Each test creates a temp project directory, runs `vp` as a subprocess,
//! and verifies stdout and/or the snapshot on disk.

use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use serde_json::Value;

const SNAPSHOT: &str = r#"[
  {
    "_id": "cat-work-0001",
    "name": "Work",
    "isMarkedDone": false,
    "priority": 2,
    "colorValue": "rgba(33, 150, 243, 0.3)",
    "colorBorder": "rgba(33, 150, 243, 0.8)",
    "__v": 3,
    "tasks": [
      {
        "_id": "task-w1",
        "name": "Report",
        "notes": "quarterly",
        "done": false,
        "canBeRepeated": false,
        "when": "2025-03-01T00:00:00.000Z",
        "priority": 1
      },
      {
        "_id": "task-w2",
        "name": "Standup",
        "done": false,
        "canBeRepeated": true,
        "when": "Monday,Wednesday",
        "priority": 2
      }
    ]
  },
  {
    "_id": "cat-home-0001",
    "name": "Home",
    "isMarkedDone": false,
    "priority": 1,
    "colorValue": "rgba(255, 255, 255, 0.1)",
    "colorBorder": "rgba(255, 255, 255, 0.8)",
    "tasks": [
      {
        "_id": "task-h1",
        "name": "Laundry",
        "done": true,
        "canBeRepeated": false,
        "priority": 1
      }
    ]
  }
]
"#;

/// Create a test project with two categories in the given directory.
fn create_test_project(root: &Path) {
    let planner_dir = root.join("planner");
    fs::create_dir_all(&planner_dir).unwrap();
    fs::write(
        planner_dir.join("planner.toml"),
        r#"[project]
name = "test-project"

[display]
date_order = "day-month"
"#,
    )
    .unwrap();
    fs::write(planner_dir.join("categories.json"), SNAPSHOT).unwrap();
}

/// Run `vp` with the given args in the given directory, returning (stdout, stderr, success).
fn run_vp(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_vp"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vp");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `vp` expecting success, return stdout.
fn run_vp_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_vp(dir, args);
    if !success {
        panic!("vp {:?} failed:\nstdout: {}\nstderr: {}", args, stdout, stderr);
    }
    stdout
}

/// Run `vp` expecting failure, return stderr.
fn run_vp_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_vp(dir, args);
    if success {
        panic!("vp {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

fn read_snapshot(root: &Path) -> Value {
    let text = fs::read_to_string(root.join("planner/categories.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn names(categories: &Value) -> Vec<String> {
    categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_then_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_vp_ok(tmp.path(), &["init", "--name", "Summer Trip"]);
    assert!(out.contains("Summer Trip"));
    assert!(tmp.path().join("planner/planner.toml").exists());

    let out = run_vp_ok(tmp.path(), &["list"]);
    assert_eq!(out, "no categories\n");
}

#[test]
fn test_init_twice_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_vp_ok(tmp.path(), &["init"]);
    let err = run_vp_err(tmp.path(), &["init"]);
    assert!(err.contains("already exists"));
}

#[test]
fn test_outside_project_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_vp_err(tmp.path(), &["list"]);
    assert!(err.contains("not a planner project"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_sorted_by_priority() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["list"]);
    let home = out.find("Home").unwrap();
    let work = out.find("Work").unwrap();
    assert!(home < work, "Home has priority 1:\n{}", out);
    assert!(out.contains("01/03, quarterly"));
    assert!(out.contains("Laundry"));
    // weekday schedules are conveyed by the repeat marker only
    assert!(!out.contains("Monday"));
}

#[test]
fn test_list_json_is_sorted_collection() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["list", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(names(&parsed), vec!["Home", "Work"]);
    assert_eq!(parsed[1]["__v"], 3);
}

#[test]
fn test_list_hides_done_when_configured() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());
    run_vp_ok(tmp.path(), &["config", "display.show_done", "false"]);

    let out = run_vp_ok(tmp.path(), &["list"]);
    assert!(!out.contains("Laundry"));
    let out = run_vp_ok(tmp.path(), &["list", "--all"]);
    assert!(out.contains("Laundry"));
}

#[test]
fn test_show_by_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["show", "cat-w"]);
    assert!(out.contains("[ ] Work"));
    assert!(out.contains("id: cat-work-0001"));
    assert!(out.contains("color: Blue"));
    assert!(out.contains("repeats: Monday,Wednesday"));
}

#[test]
fn test_show_ambiguous_and_unknown() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let err = run_vp_err(tmp.path(), &["show", "cat"]);
    assert!(err.contains("ambiguous"));
    let err = run_vp_err(tmp.path(), &["show", "nope"]);
    assert!(err.contains("category not found: nope"));
}

#[test]
fn test_today_weekday_and_date() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    // 2025-03-03 is a Monday
    let out = run_vp_ok(tmp.path(), &["today", "--date", "2025-03-03"]);
    assert!(out.contains("Work: [ ] task-w2 Standup"));
    assert!(!out.contains("Report"));

    let out = run_vp_ok(tmp.path(), &["today", "--date", "2025-03-01", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["date"], "2025-03-01");
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["tasks"][0]["name"], "Report");
    assert_eq!(parsed["tasks"][0]["subtitle"], "01/03, quarterly");
}

#[test]
fn test_today_nothing_scheduled() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    // 2025-03-04 is a Tuesday
    let out = run_vp_ok(tmp.path(), &["today", "--date", "2025-03-04"]);
    assert_eq!(out, "nothing scheduled for 04/03\n");
}

#[test]
fn test_when_outside_project() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_vp_ok(tmp.path(), &["when", "2025-03-01T00:00:00.000Z", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["kind"], "absolute-date");
    assert_eq!(parsed["display"], "01/03");
    assert_eq!(parsed["shown"], true);

    let out = run_vp_ok(tmp.path(), &["when", "Monday,Friday"]);
    assert!(out.contains("kind: weekday-set"));
    assert!(out.contains("repeating: yes"));
    assert!(out.contains("display: (hidden)"));
}

#[test]
fn test_diff_between_snapshots() {
    let tmp = tempfile::TempDir::new().unwrap();
    let before: Value = serde_json::from_str(SNAPSHOT).unwrap();
    let mut after = before.clone();
    after[1]["name"] = Value::from("House");
    let after = Value::Array(vec![after[1].clone()]);
    fs::write(tmp.path().join("before.json"), before.to_string()).unwrap();
    fs::write(tmp.path().join("after.json"), after.to_string()).unwrap();

    let out = run_vp_ok(tmp.path(), &["diff", "before.json", "after.json", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(names(&parsed["patch"]), vec!["House"]);
    assert_eq!(parsed["deleted"], serde_json::json!(["cat-work-0001"]));

    let out = run_vp_ok(tmp.path(), &["diff", "before.json", "before.json"]);
    assert_eq!(out, "no changes\n");
}

// ---------------------------------------------------------------------------
// Category writes
// ---------------------------------------------------------------------------

#[test]
fn test_category_add_appends_with_next_priority() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["category", "add", "Errands", "--color", "teal", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    let patch = parsed["patch"].as_array().unwrap();
    assert_eq!(patch.len(), 1);
    assert_eq!(patch[0]["name"], "Errands");
    assert_eq!(patch[0]["priority"], 3);
    assert_eq!(patch[0]["colorValue"], "rgba(0, 150, 136, 0.3)");
    assert_eq!(parsed["deleted"], serde_json::json!([]));

    let snapshot = read_snapshot(tmp.path());
    assert_eq!(names(&snapshot), vec!["Home", "Work", "Errands"]);
}

#[test]
fn test_category_add_rejects_unknown_color() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_err(tmp.path(), &["category", "add", "Errands", "--color", "magenta"]);
    let snapshot = read_snapshot(tmp.path());
    assert_eq!(names(&snapshot), vec!["Work", "Home"]);
}

#[test]
fn test_category_mv_patches_both() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["category", "mv", "cat-w", "1", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["patch"].as_array().unwrap().len(), 2);

    let snapshot = read_snapshot(tmp.path());
    assert_eq!(names(&snapshot), vec!["Work", "Home"]);
    assert_eq!(snapshot[0]["priority"], 1);
    assert_eq!(snapshot[1]["priority"], 2);
}

#[test]
fn test_category_reorder_by_index() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["category", "reorder", "1", "0"]);
    let snapshot = read_snapshot(tmp.path());
    assert_eq!(names(&snapshot), vec!["Work", "Home"]);

    run_vp_err(tmp.path(), &["category", "reorder", "5", "0"]);
}

#[test]
fn test_category_rm_reports_deleted_and_renumbers() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["category", "rm", "cat-h", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["deleted"], serde_json::json!(["cat-home-0001"]));
    assert_eq!(names(&parsed["patch"]), vec!["Work"]);

    let snapshot = read_snapshot(tmp.path());
    assert_eq!(snapshot[0]["priority"], 1);
}

#[test]
fn test_category_done_and_undo() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["category", "done", "cat-h"]);
    assert_eq!(read_snapshot(tmp.path())[0]["isMarkedDone"], true);
    run_vp_ok(tmp.path(), &["category", "done", "cat-h", "--undo"]);
    assert_eq!(read_snapshot(tmp.path())[0]["isMarkedDone"], false);
}

// ---------------------------------------------------------------------------
// Task writes
// ---------------------------------------------------------------------------

#[test]
fn test_task_add_repeating_on_weekdays() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(
        tmp.path(),
        &["task", "add", "cat-h", "Gym", "--on", "Monday", "--on", "Friday"],
    );
    assert!(out.starts_with("created "));
    assert!(out.contains("changed 1: Home"));

    let snapshot = read_snapshot(tmp.path());
    let gym = &snapshot[0]["tasks"][1];
    assert_eq!(gym["name"], "Gym");
    assert_eq!(gym["canBeRepeated"], true);
    assert_eq!(gym["when"], "Monday,Friday");
    assert_eq!(gym["priority"], 2);
}

#[test]
fn test_task_add_with_date_and_bad_weekday() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["task", "add", "cat-h", "Dentist", "--date", "2025-04-10"]);
    let snapshot = read_snapshot(tmp.path());
    assert_eq!(snapshot[0]["tasks"][1]["when"], "2025-04-10T00:00:00.000Z");
    assert_eq!(snapshot[0]["tasks"][1]["canBeRepeated"], false);

    let err = run_vp_err(tmp.path(), &["task", "add", "cat-h", "Swim", "--on", "Funday"]);
    assert!(err.contains("unknown weekday"));
}

#[test]
fn test_task_done_patches_only_owner_and_keeps_unknown_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["task", "done", "cat-w", "task-w1", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(names(&parsed["patch"]), vec!["Work"]);

    let snapshot = read_snapshot(tmp.path());
    assert_eq!(snapshot[1]["tasks"][0]["done"], true);
    assert_eq!(snapshot[1]["__v"], 3);
}

#[test]
fn test_task_done_twice_is_noop() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_vp_ok(tmp.path(), &["task", "done", "cat-h", "task-h1"]);
    assert_eq!(out, "no changes\n");
}

#[test]
fn test_task_mv_within_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["task", "mv", "cat-w", "task-w2", "1"]);
    let snapshot = read_snapshot(tmp.path());
    let tasks = &snapshot[1]["tasks"];
    assert_eq!(tasks[0]["name"], "Standup");
    assert_eq!(tasks[0]["priority"], 1);
    assert_eq!(tasks[1]["name"], "Report");
    assert_eq!(tasks[1]["priority"], 2);
}

#[test]
fn test_task_edit_clears_notes_and_sets_day() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["task", "edit", "cat-w", "task-w1", "--notes", ""]);
    let snapshot = read_snapshot(tmp.path());
    assert!(snapshot[1]["tasks"][0].get("notes").is_none());

    run_vp_ok(tmp.path(), &["task", "edit", "cat-w", "task-w2", "--day", "15"]);
    let snapshot = read_snapshot(tmp.path());
    assert_eq!(snapshot[1]["tasks"][1]["when"], "15");
    assert_eq!(snapshot[1]["tasks"][1]["canBeRepeated"], true);
}

#[test]
fn test_task_rm_renumbers_siblings() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["task", "rm", "cat-w", "task-w1"]);
    let snapshot = read_snapshot(tmp.path());
    let tasks = snapshot[1]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "Standup");
    assert_eq!(tasks[0]["priority"], 1);
}

// ---------------------------------------------------------------------------
// Config and -C
// ---------------------------------------------------------------------------

#[test]
fn test_config_date_order_changes_display() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    run_vp_ok(tmp.path(), &["config", "display.date_order", "month-day"]);
    let out = run_vp_ok(tmp.path(), &["list"]);
    assert!(out.contains("03/01, quarterly"));

    let err = run_vp_err(tmp.path(), &["config", "display.date_order", "sideways"]);
    assert!(err.contains("invalid date_order"));
}

#[test]
fn test_project_dir_flag() {
    let project = tempfile::TempDir::new().unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();
    create_test_project(project.path());

    let dir = project.path().to_str().unwrap();
    let out = run_vp_ok(elsewhere.path(), &["-C", dir, "show", "cat-h"]);
    assert!(out.contains("Home"));
}
