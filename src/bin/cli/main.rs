mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studyloop_lib::reviews::ReviewInterval;
use studyloop_lib::subjects::{SubjectCategory, SubjectColor};

#[derive(Parser)]
#[command(name = "studyloop", about = "Study cycle, focus timer and error reviews", version)]
struct Cli {
    /// Use a specific data directory (default: from config, then platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Today's progress, next subject and review counts
    Dashboard,

    /// Manage the subjects in the study cycle
    #[command(subcommand)]
    Subjects(SubjectsCommand),

    /// Error notebook
    #[command(subcommand)]
    Errors(ErrorsCommand),

    /// Spaced-repetition review schedule
    #[command(subcommand)]
    Reviews(ReviewsCommand),

    /// Run the focus timer for the next subject
    #[cfg(feature = "tui")]
    Timer {
        /// Study this subject instead of the next one in the rotation
        #[arg(long)]
        subject: Option<String>,
    },
}

#[derive(Subcommand)]
enum SubjectsCommand {
    /// List subjects in rotation order
    List,

    /// Add a subject (at most 6)
    Add {
        name: String,
        /// theoretical, practical or mixed
        #[arg(long, default_value = "theoretical")]
        category: SubjectCategory,
        /// blue, green, purple, orange, pink or teal
        #[arg(long, default_value = "blue")]
        color: SubjectColor,
    },

    /// Remove a subject (name, prefix or id)
    Rm { subject: String },

    /// Credit study time to a subject
    Log {
        subject: String,
        /// Hours studied
        #[arg(default_value = "1")]
        hours: f64,
    },
}

#[derive(Subcommand)]
enum ErrorsCommand {
    /// List logged errors
    List {
        /// Only errors for this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Log a new error
    Add {
        /// Subject name, prefix or id
        #[arg(long)]
        subject: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        explanation: Option<String>,
    },

    /// Delete an error (id or unique id prefix)
    Rm { id: String },

    /// Search topic, question and subject name
    Search { term: String },
}

#[derive(Subcommand)]
enum ReviewsCommand {
    /// Show overdue, due today and this week's reviews
    List {
        /// Also list completed reviews
        #[arg(long)]
        all: bool,
    },

    /// Mark a review as done
    Done {
        /// Error id or unique id prefix
        id: String,
        /// Review interval in days: 1, 7, 14 or 30
        #[arg(value_parser = parse_interval)]
        interval: ReviewInterval,
    },
}

fn parse_interval(s: &str) -> Result<ReviewInterval, String> {
    let days: i64 = s
        .trim_end_matches('d')
        .parse()
        .map_err(|_| format!("invalid interval '{}'", s))?;
    ReviewInterval::ALL
        .into_iter()
        .find(|i| i.days() == days)
        .ok_or_else(|| format!("interval must be 1, 7, 14 or 30 days, got {}", days))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        None | Some(Command::Dashboard) => {
            commands::dashboard::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Subjects(subcmd)) => match subcmd {
            SubjectsCommand::List => commands::subjects::run_list(&app, &cli.format, use_color)?,
            SubjectsCommand::Add { name, category, color } => {
                commands::subjects::run_add(&mut app, &name, category, color, &cli.format)?
            }
            SubjectsCommand::Rm { subject } => {
                commands::subjects::run_remove(&mut app, &subject, &cli.format)?
            }
            SubjectsCommand::Log { subject, hours } => {
                commands::subjects::run_log(&mut app, &subject, hours, &cli.format)?
            }
        },
        Some(Command::Errors(subcmd)) => match subcmd {
            ErrorsCommand::List { subject } => {
                commands::errors::run_list(&app, subject.as_deref(), &cli.format, use_color)?
            }
            ErrorsCommand::Add { subject, topic, question, explanation } => {
                commands::errors::run_add(&mut app, &subject, topic, question, explanation, &cli.format)?
            }
            ErrorsCommand::Rm { id } => commands::errors::run_remove(&mut app, &id, &cli.format)?,
            ErrorsCommand::Search { term } => {
                commands::errors::run_search(&app, &term, &cli.format, use_color)?
            }
        },
        Some(Command::Reviews(subcmd)) => match subcmd {
            ReviewsCommand::List { all } => {
                commands::reviews::run_list(&app, all, &cli.format, use_color)?
            }
            ReviewsCommand::Done { id, interval } => {
                commands::reviews::run_done(&mut app, &id, interval, &cli.format)?
            }
        },
        #[cfg(feature = "tui")]
        Some(Command::Timer { subject }) => {
            tui::run(&mut app, subject.as_deref())?;
        }
    }

    app.finish()
}
