//! CLI command definitions and dispatch for the `etutor` binary.
//!
//! Uses clap derive macros for argument parsing. Running `etutor` with no
//! subcommand opens the interactive classroom.

pub mod ask;
pub mod classroom;
pub mod lessons;
pub mod quiz;
pub mod summary;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use etutor_core::catalog::LessonCatalog;
use etutor_types::lesson::Lesson;

/// Learn "Introduction to Modern AI" with an AI tutor in your terminal.
#[derive(Parser)]
#[command(name = "etutor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except results and errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use built-in canned content instead of the Gemini API.
    #[arg(long, global = true, env = "ETUTOR_OFFLINE")]
    pub offline: bool,

    /// Path to a config.toml (default: <config dir>/etutor/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive classroom (default).
    Learn {
        /// Lesson to open, by id (L2) or number (2).
        #[arg(long, short)]
        lesson: Option<String>,
    },

    /// Show the syllabus.
    #[command(alias = "ls")]
    Lessons,

    /// Summarize a lesson into three key points.
    Summarize {
        /// Lesson id (L2) or number (2).
        lesson: String,
    },

    /// Generate a quiz for a lesson and take it.
    Quiz {
        /// Lesson id (L2) or number (2).
        lesson: String,
    },

    /// Ask the tutor one question about a lesson.
    Ask {
        /// Lesson id (L2) or number (2).
        lesson: String,

        /// Your question.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Look up a lesson by id or one-based number, with a helpful error.
pub fn resolve_lesson<'a>(catalog: &'a LessonCatalog, reference: &str) -> Result<(usize, &'a Lesson)> {
    catalog.resolve(reference).ok_or_else(|| {
        let ids: Vec<&str> = catalog.lessons().iter().map(|l| l.id.as_str()).collect();
        anyhow::anyhow!(
            "No lesson '{reference}'. Use an id ({}) or a number from 1 to {}.",
            ids.join(", "),
            catalog.len()
        )
    })
}

/// Steady cyan spinner, or a hidden one when `quiet`.
pub fn spinner(message: &str, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
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
    fn test_no_subcommand_means_classroom() {
        let cli = Cli::try_parse_from(["etutor", "--offline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.offline);
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["etutor", "ask", "L2", "what", "is", "data?"]).unwrap();
        match cli.command {
            Some(Commands::Ask { lesson, question }) => {
                assert_eq!(lesson, "L2");
                assert_eq!(question.join(" "), "what is data?");
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["etutor", "lessons", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_resolve_lesson_error_lists_ids() {
        let catalog = LessonCatalog::builtin();
        assert_eq!(resolve_lesson(&catalog, "3").unwrap().1.id, "L3");
        let err = resolve_lesson(&catalog, "L9").unwrap_err().to_string();
        assert!(err.contains("L1, L2, L3, L4"));
    }
}
