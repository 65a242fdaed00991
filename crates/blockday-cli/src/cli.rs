use blockday_core::models::{Priority, RecurrenceKind};
use blockday_core::recurrence::WeekStart;
use blockday_core::settings::{CalendarView, Theme};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plan your days in time blocks, right from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new time block
    Add(AddCommand),
    /// Edit a time block
    Edit(EditCommand),
    /// Delete a time block and all of its occurrences
    Delete(DeleteCommand),
    /// Manage the checklist attached to a block
    Task(TaskCommand),
    /// List stored blocks
    List(ListCommand),
    /// Show one day on the time grid
    Day(DayCommand),
    /// Show the week containing a date
    Week(WeekCommand),
    /// Manage block categories
    Category(CategoryCommand),
    /// Show or change calendar settings
    Settings(SettingsCommand),
    /// Show blocks starting soon
    Upcoming(UpcomingCommand),
    /// Write all blocks as JSON
    Export(ExportCommand),
    /// Read blocks from a JSON export
    Import(ImportCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the block
    pub title: String,
    /// Day of the (first) occurrence, e.g. 2024-06-03 or "next monday"
    #[clap(short, long)]
    pub date: Option<String>,
    /// Start time (HH:MM)
    #[clap(short, long)]
    pub start: String,
    /// End time (HH:MM, 24:00 for midnight)
    #[clap(short, long)]
    pub end: String,
    /// Category key used for colouring
    #[clap(short, long, default_value = "work")]
    pub category: String,
    /// The description of the block
    #[clap(long)]
    pub description: Option<String>,
    /// Explicit colour (#RRGGBB), overrides the category colour
    #[clap(long)]
    pub color: Option<String>,
    /// The priority of the block
    #[clap(short, long)]
    pub priority: Option<Priority>,
    /// Mark the block as ending with a quiz
    #[clap(long)]
    pub quiz: bool,
    /// Repeat the block (daily, weekly, monthly)
    #[clap(long, help = "Recurrence frequency (daily, weekly, monthly)")]
    pub every: Option<RecurrenceKind>,
    /// Days of week for weekly recurrence
    #[clap(long, requires = "every", help = "Days of week (mon,tue,... or 0-6 with 0 = Sunday)")]
    pub on: Option<String>,
    /// Last day of the recurrence
    #[clap(long, requires = "every", help = "Last day the block repeats (inclusive)")]
    pub until: Option<String>,
    /// Checklist items to attach
    #[clap(short, long = "task")]
    pub tasks: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the block to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, conflicts_with = "color")]
    pub color_clear: bool,

    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long, conflicts_with = "priority")]
    pub priority_clear: bool,

    #[arg(long)]
    pub quiz: Option<bool>,

    #[arg(long, help = "Replace the recurrence frequency (daily, weekly, monthly)")]
    pub every: Option<RecurrenceKind>,
    #[arg(long, help = "Days of week for weekly recurrence (mon,tue,... or 0-6)")]
    pub on: Option<String>,
    #[arg(long, help = "Last day the block repeats (inclusive)")]
    pub until: Option<String>,
    #[arg(long, conflicts_with = "until")]
    pub until_clear: bool,
    #[arg(
        long,
        conflicts_with_all = ["every", "on", "until", "until_clear"],
        help = "Remove recurrence (convert to a one-off block)"
    )]
    pub recurrence_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the block to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskSubcommand {
    /// Attach a checklist item to a block
    Add {
        /// The ID of the block
        block: String,
        /// The title of the item
        title: String,
        #[clap(short, long)]
        priority: Option<Priority>,
    },
    /// Mark a checklist item as done
    Done {
        block: String,
        /// The ID (or prefix) of the item
        task: String,
    },
    /// Mark a checklist item as not done
    Undo { block: String, task: String },
    /// Remove a checklist item
    Remove { block: String, task: String },
    /// Show the checklist of a block
    List { block: String },
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only blocks in this category
    #[clap(short, long)]
    pub category: Option<String>,
    /// Only recurring blocks
    #[clap(short, long)]
    pub recurring: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DayCommand {
    /// The day to show (defaults to today)
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct WeekCommand {
    /// Any day inside the week to show (defaults to today)
    pub date: Option<String>,
    /// First day of the week, overriding the saved setting
    #[clap(long)]
    pub week_start: Option<WeekStart>,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a custom category
    Add {
        /// The name of the category
        name: String,
        /// The colour of the category (#RRGGBB)
        color: String,
    },
    /// List built-in and custom categories
    List,
    /// Delete a custom category
    Delete {
        name: String,
        #[clap(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsSubcommand {
    /// Show the current settings
    Show,
    /// Change one or more settings
    Set(SettingsSetArgs),
    /// Restore the default settings
    Reset {
        #[clap(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct SettingsSetArgs {
    #[arg(long)]
    pub view: Option<CalendarView>,
    #[arg(long)]
    pub week_start: Option<WeekStart>,
    #[arg(long, help = "Start of working hours (HH:MM)")]
    pub work_start: Option<String>,
    #[arg(long, help = "End of working hours (HH:MM)")]
    pub work_end: Option<String>,
    #[arg(long)]
    pub notifications: Option<bool>,
    #[arg(long, help = "Reminder lead time in minutes")]
    pub reminder: Option<u32>,
    #[arg(long)]
    pub sound: Option<bool>,
    #[arg(long)]
    pub browser_notifications: Option<bool>,
    #[arg(long)]
    pub theme: Option<Theme>,
}

const MAX_LOOKAHEAD_HOURS: i64 = 366 * 24;

#[derive(Parser, Debug, Clone)]
pub struct UpcomingCommand {
    /// How far ahead to look, up to a year
    #[clap(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKAHEAD_HOURS))]
    pub hours: u32,
    /// Show pending reminders instead of occurrences
    #[clap(long)]
    pub reminders: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// Output file (stdout when omitted)
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// JSON file holding an array of blocks
    pub file: PathBuf,
}
