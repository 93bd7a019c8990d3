//! Command-line interface for quiz_classroom.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quiz Tic-Tac-Toe - classroom game on the terminal
#[derive(Parser, Debug)]
#[command(name = "quiz_classroom")]
#[command(about = "Teams answer timed questions to claim cells on a tic-tac-toe board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in theme to draw questions from
        #[arg(short, long, conflicts_with = "questions")]
        theme: Option<String>,

        /// JSON file with the questions
        #[arg(short, long)]
        questions: Option<PathBuf>,

        /// Team name, once per team in turn order (2 to 5)
        #[arg(long = "team")]
        teams: Vec<String>,

        /// Seed for question draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the built-in themes
    Themes,

    /// Load and validate a question file
    Check {
        /// JSON file with the questions
        #[arg(short, long)]
        questions: PathBuf,
    },
}
