use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vp", about = concat!("planner v", env!("CARGO_PKG_VERSION"), " - categories, tasks, and when to do them"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planner project in the current directory
    Init(InitArgs),
    /// List categories and their tasks in priority order
    List(ListArgs),
    /// Show one category in detail
    Show(ShowArgs),
    /// Show tasks scheduled for a day
    Today(TodayArgs),
    /// Category management
    Category(CategoryCmd),
    /// Task management
    Task(TaskCmd),
    /// Compare two snapshots and print the changed subset
    Diff(DiffArgs),
    /// Classify a `when` value and show how it displays
    When(WhenArgs),
    /// Set a config value in planner.toml
    Config(ConfigArgs),
}

// ---------------------------------------------------------------------------
// Init / read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Project name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if planner/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include done tasks even when display.show_done is false
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Category id or unique id prefix
    pub category: String,
}

#[derive(Args)]
pub struct TodayArgs {
    /// Day to check, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot before the change
    pub before: String,
    /// Snapshot after the change
    pub after: String,
}

#[derive(Args)]
pub struct WhenArgs {
    /// Raw `when` value
    pub value: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Dotted key, e.g. display.date_order
    pub key: String,
    /// New value
    pub value: String,
}

// ---------------------------------------------------------------------------
// Category commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CategoryCmd {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a category at the bottom of the list
    Add {
        /// Category name
        name: String,
        /// Palette color name (default: White)
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolor a category
    Edit {
        /// Category id or unique id prefix
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Mark a category done
    Done {
        /// Category id or unique id prefix
        category: String,
        /// Clear the done mark instead
        #[arg(long)]
        undo: bool,
    },
    /// Move a category to a priority (1 = top)
    Mv {
        /// Category id or unique id prefix
        category: String,
        priority: u32,
    },
    /// Move the category at one list position to another (0-based)
    Reorder { from: usize, to: usize },
    /// Delete a category and its tasks
    Rm {
        /// Category id or unique id prefix
        category: String,
    },
    /// List palette colors
    Colors,
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

/// Schedule flags shared by `task add` and `task edit`
#[derive(Args, Default)]
pub struct ScheduleArgs {
    /// Task repeats
    #[arg(long, conflicts_with = "no_repeat")]
    pub repeat: bool,
    /// Task does not repeat
    #[arg(long)]
    pub no_repeat: bool,
    /// Weekday for a repeating task (repeatable), e.g. --on Monday
    #[arg(long = "on", value_name = "WEEKDAY")]
    pub on: Vec<String>,
    /// Day of month for a repeating task
    #[arg(long, value_name = "N", conflicts_with = "on")]
    pub day: Option<u32>,
    /// Date for a one-off task, YYYY-MM-DD
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

impl ScheduleArgs {
    pub fn touches_schedule(&self) -> bool {
        self.repeat || self.no_repeat || !self.on.is_empty() || self.day.is_some() || self.date.is_some()
    }
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task at the bottom of a category
    Add {
        /// Category id or unique id prefix
        category: String,
        /// Task name
        name: String,
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Edit a task's name, notes, or schedule
    Edit {
        /// Category id or unique id prefix
        category: String,
        /// Task id or unique id prefix
        task: String,
        #[arg(long)]
        name: Option<String>,
        /// New notes (empty string clears)
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Mark a task done
    Done {
        category: String,
        task: String,
        /// Clear the done mark instead
        #[arg(long)]
        undo: bool,
    },
    /// Move a task to a priority within its category (1 = top)
    Mv {
        category: String,
        task: String,
        priority: u32,
    },
    /// Move the task at one position to another within a category (0-based)
    Reorder {
        category: String,
        from: usize,
        to: usize,
    },
    /// Delete a task
    Rm { category: String, task: String },
}
