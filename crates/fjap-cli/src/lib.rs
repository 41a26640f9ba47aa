//! FJAP CLI Library
//!
//! Terminal front end for the FJAP academic management API.
//!
//! # Overview
//!
//! - **Classes**: list, inspect, create, edit, toggle and delete (`fjap classes ...`)
//! - **Subjects**: filtered and paginated listing plus CRUD (`fjap subjects ...`)
//! - **Semesters / Levels**: reference data (`fjap semesters ...`, `fjap levels ...`)
//! - **Grades**: grade records and their components (`fjap grades ...`)
//! - **Students**: directory search (`fjap students ...`)
//! - **Mark report**: a student's marks by semester (`fjap mark-report ...`)
//!
//! Every command accepts `--format json` to print the raw payload instead of
//! a table.

pub mod api;
pub mod commands;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use error::{CliError, Result};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// FJAP - academic management from the terminal
#[derive(Parser, Debug)]
#[command(name = "fjap")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL
    #[arg(long, env = "FJAP_SERVER_URL", default_value = "http://localhost:8000", global = true)]
    pub server_url: String,

    /// Bearer token for authenticated servers
    #[arg(long, env = "FJAP_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// `active` / `inactive` on the command line, `true` / `false` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl StatusArg {
    pub fn is_active(self) -> bool {
        matches!(self, StatusArg::Active)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage classes
    Classes {
        #[command(subcommand)]
        command: ClassCommand,
    },

    /// Manage subjects
    Subjects {
        #[command(subcommand)]
        command: SubjectCommand,
    },

    /// Manage semesters
    Semesters {
        #[command(subcommand)]
        command: SemesterCommand,
    },

    /// Manage levels
    Levels {
        #[command(subcommand)]
        command: LevelCommand,
    },

    /// Manage grades and grade components
    Grades {
        #[command(subcommand)]
        command: GradeCommand,
    },

    /// Browse students
    Students {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Show a student's mark report
    MarkReport {
        /// Student id
        student_id: i32,

        /// Only this semester (requires --year)
        #[arg(long, requires = "year")]
        semester: Option<String>,

        /// Year of --semester
        #[arg(long)]
        year: Option<i32>,

        /// Only this subject
        #[arg(long, conflicts_with = "semester")]
        subject: Option<i32>,
    },

    /// Check server and database health
    Health,

    /// Show the identity behind the current token
    Whoami,
}

/// Class subcommands
#[derive(Subcommand, Debug)]
pub enum ClassCommand {
    /// List all classes
    List,

    /// Active classes as id/name pairs
    Lookup,

    /// Semesters and levels available to the class form
    Options,

    /// Show editable fields of a class
    Info { class_id: String },

    /// List subjects taught in a class
    Subjects { class_id: String },

    /// Create a class
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        semester: i32,
        #[arg(long)]
        level: i32,
    },

    /// Edit a class; omitted fields keep their current value
    Update {
        class_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        semester: Option<i32>,
        #[arg(long)]
        level: Option<i32>,
    },

    /// Activate or deactivate a class
    Status {
        class_id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Delete a class
    Delete { class_id: String },
}

/// Fields of the subject form
#[derive(Args, Debug, Clone, Default)]
pub struct SubjectFields {
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub pass_mark: Option<f64>,
    #[arg(long)]
    pub semester: Option<i32>,
    #[arg(long)]
    pub level: Option<i32>,
    #[arg(long)]
    pub class: Option<String>,
}

/// Subject subcommands
#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
    /// List subjects with filters and pagination
    List {
        /// Match against code or name
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        semester: Option<i32>,
        #[arg(long)]
        level: Option<i32>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        per_page: Option<i64>,
    },

    /// Subjects with class, level and semester names
    Details,

    /// Semesters, levels and active classes available to the subject form
    Options,

    /// Show a subject by id
    Get { subject_id: i32 },

    /// Show a subject by code
    Code { subject_code: String },

    /// Subjects of a class
    ByClass { class_id: String },

    /// Subjects of a semester
    BySemester { semester_id: i32 },

    /// Subjects of a level
    ByLevel { level_id: i32 },

    /// Create a subject; code, name, pass mark, semester, level and class are required
    Create {
        #[command(flatten)]
        fields: SubjectFields,
    },

    /// Edit a subject; omitted fields keep their current value
    Update {
        subject_id: i32,
        #[command(flatten)]
        fields: SubjectFields,
    },

    /// Activate or deactivate a subject
    Status {
        subject_id: i32,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Delete a subject
    Delete { subject_id: i32 },
}

/// Semester subcommands
#[derive(Subcommand, Debug)]
pub enum SemesterCommand {
    /// Semesters as id/name pairs, newest first
    List,

    /// Full semester records
    All,

    Get { semester_id: i32 },

    Create {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
    },

    /// Edit a semester; omitted fields keep their current value
    Update {
        semester_id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    Delete { semester_id: i32 },
}

/// Level subcommands
#[derive(Subcommand, Debug)]
pub enum LevelCommand {
    /// Levels as id/name pairs
    List,

    Get { level_id: i32 },

    Create {
        #[arg(long)]
        name: String,
    },

    Update {
        level_id: i32,
        #[arg(long)]
        name: String,
    },

    Delete { level_id: i32 },
}

/// Fields of a grade component
#[derive(Args, Debug, Clone)]
pub struct ComponentFields {
    /// Attendance, Assignment, Midterm, Final, ...
    #[arg(long)]
    pub name: String,
    /// Percentage of the final mark (0-100)
    #[arg(long)]
    pub weight: f64,
    /// Score out of 10
    #[arg(long)]
    pub score: f64,
    #[arg(long)]
    pub comment: Option<String>,
}

/// Grade subcommands
#[derive(Subcommand, Debug)]
pub enum GradeCommand {
    /// Grades of a subject with running totals
    List {
        #[arg(long)]
        subject: i32,
    },

    /// Show a grade with its components
    Get { grade_id: i32 },

    /// Open a grade for a student in a subject
    Create {
        #[arg(long)]
        student: i32,
        #[arg(long)]
        subject: i32,
    },

    /// Delete a grade and its components
    Delete { grade_id: i32 },

    /// Add a component to a grade
    AddComponent {
        grade_id: i32,
        #[command(flatten)]
        fields: ComponentFields,
    },

    /// Replace a component's fields
    UpdateComponent {
        grade_type_id: i32,
        #[command(flatten)]
        fields: ComponentFields,
    },

    /// Activate or deactivate a component
    ComponentStatus {
        grade_type_id: i32,
        #[arg(value_enum)]
        status: StatusArg,
    },
}

/// Student subcommands
#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Search students by name, code or email
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        per_page: Option<i64>,
    },

    /// Show a student and their classes
    Get { student_id: i32 },
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
    fn test_parse_class_create() {
        let cli = Cli::try_parse_from([
            "fjap", "classes", "create", "--name", "SE1801", "--semester", "1", "--level", "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Classes {
                command:
                    ClassCommand::Create {
                        name,
                        semester,
                        level,
                    },
            } => {
                assert_eq!(name, "SE1801");
                assert_eq!(semester, 1);
                assert_eq!(level, 2);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_and_format() {
        let cli = Cli::try_parse_from([
            "fjap", "--format", "json", "subjects", "status", "12", "inactive",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Subjects {
                command: SubjectCommand::Status {
                    subject_id: 12,
                    status: StatusArg::Inactive
                }
            }
        ));
    }

    #[test]
    fn test_mark_report_semester_requires_year() {
        let result = Cli::try_parse_from(["fjap", "mark-report", "7", "--semester", "Fall"]);
        assert!(result.is_err());

        let result =
            Cli::try_parse_from(["fjap", "mark-report", "7", "--semester", "Fall", "--year", "2024"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_semester_dates_are_parsed() {
        let result = Cli::try_parse_from([
            "fjap", "semesters", "create", "--name", "Fall", "--start", "2024-09-01", "--end",
            "not-a-date",
        ]);
        assert!(result.is_err());
    }
}
