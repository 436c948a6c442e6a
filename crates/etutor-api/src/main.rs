//! E-Tutor terminal entry point.
//!
//! Binary name: `etutor`
//!
//! Parses CLI arguments, sets up tracing, builds the content service once,
//! then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use etutor_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        v => filter_for_verbosity(v),
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Learn { lesson: None });

    // Completions and the syllabus need no provider.
    if let Commands::Completions { shell } = &command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "etutor", &mut std::io::stdout());
        return Ok(());
    }
    if let Commands::Lessons = &command {
        let catalog = etutor_core::catalog::LessonCatalog::builtin();
        return cli::lessons::list_lessons(&catalog, cli.json);
    }

    let state = AppState::init(cli.config.as_deref(), cli.offline).await?;

    match command {
        Commands::Learn { lesson } => {
            cli::classroom::loop_runner::run_classroom(&state, lesson.as_deref()).await?;
        }
        Commands::Summarize { lesson } => {
            cli::summary::summarize_lesson(&state, &lesson, cli.json, cli.quiet).await?;
        }
        Commands::Quiz { lesson } => {
            cli::quiz::take_quiz(&state, &lesson, cli.json, cli.quiet).await?;
        }
        Commands::Ask { lesson, question } => {
            cli::ask::ask(&state, &lesson, &question.join(" "), cli.json, cli.quiet).await?;
        }
        Commands::Lessons | Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
