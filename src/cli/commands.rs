use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_AI_MODEL, DEFAULT_AI_URL};
use crate::models::{date, TaskPriority, TaskStatus};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "ngoboard",
    version = VERSION,
    about = "Project and task tracker for NGO programmes, with impact reporting",
    after_help = "\
NOTE:
  All data lives in one SQLite file under --data-dir (default: <local data dir>/ngoboard).
  Until something is saved, commands show a built-in sample data set.

PROGRESS:
  A project's progress is always round(100 * done / total) over its tasks, 0 with no tasks.
  It is recomputed after every task change and cannot be set directly.

EXIT CODES:
  0  Success
  1  Error (not found, validation, aborted confirmation, storage, etc.)

AI:
  Set GEMINI_API_KEY to let `project create --goal` draft tasks and `report --ai` write a summary.
  Without a key (or when the call fails) the project is created with no tasks and the
  report shows a placeholder summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the database
    #[arg(long, global = true, env = "NGOBOARD_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Treat this calendar day as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "NGOBOARD_TODAY", hide = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// API key for the generative-AI service
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for plans and summaries
    #[arg(long, global = true, env = "NGOBOARD_AI_MODEL", default_value = DEFAULT_AI_MODEL)]
    pub ai_model: String,

    /// Base URL of the generative-AI API
    #[arg(long, global = true, env = "NGOBOARD_AI_URL", default_value = DEFAULT_AI_URL, hide = true)]
    pub ai_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and store the sample data set if nothing is stored yet
    Init {
        /// Discard stored data and start again from the sample set
        #[arg(long)]
        reset: bool,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project documents (metadata only)
    #[command(subcommand)]
    Doc(DocCommands),

    /// Dashboard and impact statistics across all projects
    Report {
        /// Ask the AI service for a short narrative summary
        #[arg(long)]
        ai: bool,
    },

    /// Tasks due in a month, grouped by day
    Calendar {
        /// Month as YYYY-MM (default: the current month)
        #[arg(long)]
        month: Option<String>,
        /// Only this project (ID, ID prefix or title)
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project, optionally drafting its tasks with AI
    #[command(after_help = "\
NOTE:
  With --goal the AI service drafts a description, 5-8 tasks and KPI estimates.
  Drafted tasks start as todo and are due on the project end date.
  If drafting fails the project is still created, with no tasks.")]
    Create {
        /// Project title
        title: String,
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
        /// Free-text goal handed to the plan generator
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        budget: Option<f64>,
    },
    /// Create a project from a plan read on stdin
    #[command(after_help = "\
STDIN FORMAT:
  {\"description\":\"...\", \"tasks\":[{\"title\":\"...\", \"priority\":\"High\", \"assignee\":\"Coordinator\"}],
   \"kpi\":{\"beneficiaries\":100, \"volunteers\":10}}

NOTE:
  Same mapping as AI drafting: every task starts as todo, due on the end date.
  Priorities other than Low/Medium/High become Low.")]
    Import {
        /// Project title
        title: String,
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
        #[arg(long, allow_negative_numbers = true)]
        budget: Option<f64>,
    },
    /// List projects
    List {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Show project details
    Show {
        /// Project ID, ID prefix or title
        reference: String,
    },
    /// Edit project settings and KPIs
    Edit {
        reference: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        #[arg(long)]
        beneficiaries: Option<u64>,
        #[arg(long)]
        volunteers: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        budget: Option<f64>,
    },
    /// Delete a project with all its tasks and documents
    Delete {
        reference: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task (always starts as todo)
    #[command(after_help = "\
NOTE:
  An empty title creates nothing and is not an error.
  Assignee defaults to \"Unassigned\", priority to medium, due date to the project end date.")]
    Add {
        /// Task title
        title: String,
        /// Owning project (ID, ID prefix or title)
        #[arg(long)]
        project: String,
        #[arg(long)]
        assignee: Option<String>,
        /// Avatar URL for the assignee
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Only this project
        #[arg(long)]
        project: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Edit task fields, including status
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },
    /// Set a task's status (todo | in_progress | done)
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// One step forward (todo → in_progress → done)
    Advance { id: String },
    /// One step back (done → in_progress → todo)
    Revert { id: String },
    /// Delete a task
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DocCommands {
    /// Record a document on a project
    Add {
        /// File name
        name: String,
        #[arg(long)]
        project: String,
        /// MIME type (guessed from the extension when omitted)
        #[arg(long = "type")]
        mime_type: Option<String>,
    },
    /// List a project's documents
    List {
        #[arg(long)]
        project: String,
    },
    /// Delete a document
    Delete {
        /// Document ID
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    date::parse_calendar_day(s).ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(s).ok_or_else(|| format!("invalid status '{s}', expected todo | in_progress | done"))
}

fn parse_priority(s: &str) -> Result<TaskPriority, String> {
    TaskPriority::from_str(s).ok_or_else(|| format!("invalid priority '{s}', expected low | medium | high"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_task_move() {
        let cli = Cli::try_parse_from(["ngoboard", "task", "move", "t1", "in_progress", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Task(TaskCommands::Move { id, status }) => {
                assert_eq!(id, "t1");
                assert_eq!(status, TaskStatus::InProgress);
            }
            _ => panic!("expected task move"),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["ngoboard", "task", "move", "t1", "blocked"]).is_err());
    }
}
