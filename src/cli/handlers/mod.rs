mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::project_io::{self, ProjectError};
use crate::model::category::{CategoryChanges, NewCategory};
use crate::model::palette::PALETTE;
use crate::model::project::Project;
use crate::model::schedule::{DateOrder, weekday_from_name};
use crate::model::task::{NewTask, TaskChanges};
use crate::ops::edit::{self, Edit, Payload};
use crate::ops::priority::{self, Keyed};
use crate::ops::schedule_ops::{self, RepeatSelection, ScheduleError};
use crate::ops::task_ops;
use crate::parse::parse_date;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every command for one invocation
struct Ctx {
    /// Where project discovery starts (cwd, or the -C directory)
    start: PathBuf,
    json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let start = match cli.project_dir {
        Some(ref dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let ctx = Ctx {
        start,
        json: cli.json,
    };

    match cli.command {
        // Init runs before project discovery
        Commands::Init(args) => cmd_init(args, &ctx.start),

        // Read commands
        Commands::List(args) => cmd_list(&ctx, args),
        Commands::Show(args) => cmd_show(&ctx, args),
        Commands::Today(args) => cmd_today(&ctx, args),
        Commands::When(args) => cmd_when(&ctx, args),
        Commands::Diff(args) => cmd_diff(&ctx, args),

        // Write commands
        Commands::Category(cmd) => cmd_category(&ctx, cmd.action),
        Commands::Task(cmd) => cmd_task(&ctx, cmd.action),
        Commands::Config(args) => cmd_config(&ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_project(ctx: &Ctx) -> Result<Project, ProjectError> {
    let root = project_io::discover_project(&ctx.start)?;
    project_io::load_project(&root)
}

/// Resolve a user-typed id: an exact match wins, otherwise the prefix must
/// match exactly one item.
fn resolve_id<T: Keyed>(items: &[T], query: &str, what: &str) -> Result<String, String> {
    let query = query.trim();
    if let Some(item) = items.iter().find(|i| i.key() == query) {
        return Ok(item.key().to_string());
    }
    if query.is_empty() {
        return Err(format!("{} id cannot be empty", what));
    }
    let matches: Vec<&str> = items
        .iter()
        .map(|i| i.key())
        .filter(|k| k.starts_with(query))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(format!("{} not found: {}", what, query)),
        many => Err(format!("ambiguous {} id '{}' ({} matches)", what, query, many.len())),
    }
}

fn resolve_category(project: &Project, query: &str) -> Result<String, String> {
    resolve_id(&project.categories, query, "category")
}

fn resolve_task(project: &Project, category_id: &str, query: &str) -> Result<String, String> {
    let tasks = project
        .categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.tasks.as_slice())
        .unwrap_or_default();
    resolve_id(tasks, query, "task")
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

/// Apply an edit, persist the result, and report the changed subset.
fn run_edit(ctx: &Ctx, mut project: Project, edit: Edit) -> CmdResult {
    let mut applied = edit::apply(&project.categories, edit)?;
    if !applied.found {
        return Err("target not found".into());
    }

    if !applied.is_noop() {
        project.categories = std::mem::take(&mut applied.categories);
        project_io::save_categories(&project)?;
        tracing::info!(
            changed = applied.patch.len(),
            deleted = applied.deleted.len(),
            "snapshot saved"
        );
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&applied.payload())?);
    } else {
        if let Some(ref id) = applied.created {
            println!("created {}", id);
        }
        for line in format_change_summary(&applied.patch, &applied.deleted) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Ctx, args: ListArgs) -> CmdResult {
    let project = load_project(ctx)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&project.categories)?);
        return Ok(());
    }

    if project.categories.is_empty() {
        println!("no categories");
        return Ok(());
    }
    let show_done = args.all || project.config.display.show_done;
    let order = project.config.display.date_order;
    for (i, category) in project.categories.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_category_listing(category, order, show_done) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(ctx: &Ctx, args: ShowArgs) -> CmdResult {
    let project = load_project(ctx)?;
    let id = resolve_category(&project, &args.category)?;
    let Some(category) = project.categories.iter().find(|c| c.id == id) else {
        return Err(format!("category not found: {}", args.category).into());
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(category)?);
    } else {
        for line in format_category_detail(category, project.config.display.date_order) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_today(ctx: &Ctx, args: TodayArgs) -> CmdResult {
    let project = load_project(ctx)?;
    let date = match args.date {
        Some(ref s) => parse_day(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let order = project.config.display.date_order;

    let due: Vec<_> = project
        .categories
        .iter()
        .flat_map(|c| c.tasks.iter().map(move |t| (c, t)))
        .filter(|(_, t)| schedule_ops::occurs_on(&t.schedule(), date))
        .collect();

    if ctx.json {
        let out = TodayJson {
            date: date.format("%Y-%m-%d").to_string(),
            tasks: due
                .iter()
                .map(|(c, t)| today_task_to_json(c, t, order))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if due.is_empty() {
        println!("nothing scheduled for {}", order.format(date));
        return Ok(());
    }
    for (category, task) in due {
        println!("{}: {}", category.name, format_task_line(task, order));
    }
    Ok(())
}

fn cmd_when(ctx: &Ctx, args: WhenArgs) -> CmdResult {
    // Outside a project the default date order applies
    let order = match load_project(ctx) {
        Ok(project) => project.config.display.date_order,
        Err(ProjectError::NotAProject) => DateOrder::default(),
        Err(e) => return Err(e.into()),
    };
    let info = when_to_json(&args.value, order);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("kind: {}", info.kind);
    println!("repeating: {}", if info.repeating { "yes" } else { "no" });
    if info.shown {
        println!("display: {}", info.display);
    } else {
        println!("display: (hidden)");
    }
    Ok(())
}

fn cmd_diff(ctx: &Ctx, args: DiffArgs) -> CmdResult {
    let before = project_io::read_snapshot(Path::new(&args.before))?;
    let after = project_io::read_snapshot(Path::new(&args.after))?;
    let patch = priority::diff(&before, &after);
    let deleted = priority::removed_keys(&before, &after);

    if ctx.json {
        let payload = Payload {
            patch: &patch,
            deleted: &deleted,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for line in format_change_summary(&patch, &deleted) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Category handlers
// ---------------------------------------------------------------------------

fn cmd_category(ctx: &Ctx, action: CategoryAction) -> CmdResult {
    if let CategoryAction::Colors = action {
        return cmd_colors(ctx);
    }

    let project = load_project(ctx)?;
    let edit = match action {
        CategoryAction::Add { name, color } => Edit::AddCategory(NewCategory {
            id: None,
            name,
            color,
        }),
        CategoryAction::Edit {
            category,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                return Err("nothing to change (use --name or --color)".into());
            }
            Edit::UpdateCategory {
                category_id: resolve_category(&project, &category)?,
                changes: CategoryChanges { name, color },
            }
        }
        CategoryAction::Done { category, undo } => Edit::SetCategoryDone {
            category_id: resolve_category(&project, &category)?,
            done: !undo,
        },
        CategoryAction::Mv { category, priority } => Edit::SetCategoryPriority {
            category_id: resolve_category(&project, &category)?,
            priority,
        },
        CategoryAction::Reorder { from, to } => Edit::ReorderCategories { from, to },
        CategoryAction::Rm { category } => Edit::RemoveCategory {
            category_id: resolve_category(&project, &category)?,
        },
        CategoryAction::Colors => return cmd_colors(ctx),
    };
    run_edit(ctx, project, edit)
}

fn cmd_colors(ctx: &Ctx) -> CmdResult {
    if ctx.json {
        let colors: Vec<ColorJson> = PALETTE
            .iter()
            .map(|c| ColorJson {
                name: c.name,
                value: c.value,
                border: c.border,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&colors)?);
    } else {
        for c in &PALETTE {
            println!("{:<12} {}", c.name, c.value);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task handlers
// ---------------------------------------------------------------------------

/// Whether the flags describe a repeating task. `--on` and `--day` imply
/// `--repeat`; `--no-repeat` wins over everything.
fn wants_repeat(schedule: &ScheduleArgs) -> bool {
    !schedule.no_repeat && (schedule.repeat || !schedule.on.is_empty() || schedule.day.is_some())
}

fn check_schedule_flags(schedule: &ScheduleArgs) -> Result<(), String> {
    if schedule.date.is_some() && wants_repeat(schedule) {
        return Err("--date is for one-off tasks; use --on or --day for repeating ones".to_string());
    }
    if schedule.no_repeat && (!schedule.on.is_empty() || schedule.day.is_some()) {
        return Err("--on and --day need a repeating task".to_string());
    }
    Ok(())
}

/// `when` for a new task from its flags.
fn new_task_when(schedule: &ScheduleArgs) -> Result<Option<String>, Box<dyn std::error::Error>> {
    check_schedule_flags(schedule)?;
    let date = schedule.date.as_deref().map(parse_day).transpose()?;
    Ok(schedule_ops::build_when(
        wants_repeat(schedule),
        date,
        schedule.on.as_slice(),
        schedule.day,
    )?)
}

/// `when` for an edited task: repeat flags adjust the existing selection
/// rather than replacing it.
fn edited_task_when(
    schedule: &ScheduleArgs,
    current: Option<&str>,
    was_repeating: bool,
) -> Result<(bool, Option<String>), Box<dyn std::error::Error>> {
    check_schedule_flags(schedule)?;
    let repeat = !schedule.no_repeat && schedule.date.is_none() && (wants_repeat(schedule) || was_repeating);

    if !repeat {
        let date = schedule.date.as_deref().map(parse_day).transpose()?;
        return Ok((false, date.map(schedule_ops::date_to_when)));
    }

    let mut selection = if was_repeating {
        RepeatSelection::from_when(current)
    } else {
        RepeatSelection::default()
    };
    if !schedule.on.is_empty() {
        selection.clear();
        for name in &schedule.on {
            let day = weekday_from_name(name).ok_or_else(|| ScheduleError::UnknownWeekday(name.clone()))?;
            if !selection.weekdays().contains(&day) {
                selection.toggle_weekday(day);
            }
        }
    }
    // weekdays take precedence over a day of month
    if let Some(day) = schedule.day
        && schedule.on.is_empty()
    {
        selection.select_day_of_month(day)?;
    }
    Ok((true, selection.to_when()))
}

fn cmd_task(ctx: &Ctx, action: TaskAction) -> CmdResult {
    let project = load_project(ctx)?;
    let edit = match action {
        TaskAction::Add {
            category,
            name,
            notes,
            schedule,
        } => Edit::AddTask {
            category_id: resolve_category(&project, &category)?,
            task: NewTask {
                id: None,
                name,
                notes,
                done: None,
                can_be_repeated: wants_repeat(&schedule),
                when: new_task_when(&schedule)?,
            },
        },
        TaskAction::Edit {
            category,
            task,
            name,
            notes,
            schedule,
        } => {
            let category_id = resolve_category(&project, &category)?;
            let task_id = resolve_task(&project, &category_id, &task)?;
            let mut changes = TaskChanges {
                name,
                notes: notes.map(|n| Some(n).filter(|n| !n.trim().is_empty())),
                ..TaskChanges::default()
            };
            if schedule.touches_schedule() {
                let current = task_ops::find_task(&project.categories, &category_id, &task_id);
                let (repeat, when) = edited_task_when(
                    &schedule,
                    current.and_then(|t| t.when.as_deref()),
                    current.is_some_and(|t| t.can_be_repeated),
                )?;
                changes.can_be_repeated = Some(repeat);
                changes.when = Some(when);
            }
            if changes.is_empty() {
                return Err("nothing to change".into());
            }
            Edit::UpdateTask {
                category_id,
                task_id,
                changes,
            }
        }
        TaskAction::Done {
            category,
            task,
            undo,
        } => {
            let category_id = resolve_category(&project, &category)?;
            let task_id = resolve_task(&project, &category_id, &task)?;
            Edit::SetTaskDone {
                category_id,
                task_id,
                done: !undo,
            }
        }
        TaskAction::Mv {
            category,
            task,
            priority,
        } => {
            let category_id = resolve_category(&project, &category)?;
            let task_id = resolve_task(&project, &category_id, &task)?;
            Edit::SetTaskPriority {
                category_id,
                task_id,
                priority,
            }
        }
        TaskAction::Reorder { category, from, to } => Edit::ReorderTasks {
            category_id: resolve_category(&project, &category)?,
            from,
            to,
        },
        TaskAction::Rm { category, task } => {
            let category_id = resolve_category(&project, &category)?;
            let task_id = resolve_task(&project, &category_id, &task)?;
            Edit::RemoveTask {
                category_id,
                task_id,
            }
        }
    };
    run_edit(ctx, project, edit)
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Ctx, args: ConfigArgs) -> CmdResult {
    let root = project_io::discover_project(&ctx.start)?;
    let planner_dir = root.join(project_io::PLANNER_DIR);
    let (_config, mut doc) = config_io::read_config(&planner_dir)?;
    config_io::set_config_value(&mut doc, &args.key, &args.value)?;
    config_io::write_config(&planner_dir, &doc)?;
    tracing::info!(key = %args.key, "config updated");
    if !ctx.json {
        println!("{} = {}", args.key, args.value);
    }
    Ok(())
}
