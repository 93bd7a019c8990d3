//! Quiz Classroom - command-line entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use quiz_classroom::{Classroom, ClassroomConfig, Cli, Command, StdinInput};
use quiz_tictactoe::{JsonFileSource, MatchSetup, QuestionSource, builtin_themes};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with prompts.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            theme,
            questions,
            teams,
            seed,
        } => run_play(config, theme, questions, teams, seed).await,
        Command::Themes => list_themes(),
        Command::Check { questions } => check_questions(questions),
    }
}

/// Play matches on the terminal
#[instrument]
async fn run_play(
    config: Option<PathBuf>,
    theme: Option<String>,
    questions: Option<PathBuf>,
    teams: Vec<String>,
    seed: Option<u64>,
) -> Result<()> {
    let config = match config {
        Some(path) => ClassroomConfig::from_file(path)?,
        None => ClassroomConfig::default(),
    }
    .with_overrides(theme, questions, teams, seed);

    let classroom = Classroom::from_config(&config, StdinInput::spawn(), std::io::stdout())?;
    let results = classroom.run().await?;
    info!(matches = results.len(), "Session finished");
    Ok(())
}

/// Print the bundled themes
fn list_themes() -> Result<()> {
    for theme in builtin_themes() {
        println!("{} ({} questions)", theme.name(), theme.len());
    }
    Ok(())
}

/// Validate a question file
#[instrument]
fn check_questions(path: PathBuf) -> Result<()> {
    let source = JsonFileSource::new(path);
    let questions = source.load()?;
    let total = questions.len();
    let setup = MatchSetup::new()
        .default_teams(2)
        .questions(questions)
        .validate()?;
    println!(
        "{}: {} questions, {} playable",
        source.label(),
        total,
        setup.questions.len()
    );
    Ok(())
}
