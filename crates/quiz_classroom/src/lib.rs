//! Quiz Classroom - terminal driver for quiz tic-tac-toe
//!
//! Reads cell choices and answers as typed lines, runs the quiz clock and
//! prints the board, countdown and verdicts.
//!
//! # Architecture
//!
//! - **Config**: TOML file plus command-line overrides
//! - **Input**: typed lines behind the [`LineInput`] trait
//! - **Driver**: the match loop ([`Classroom`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod driver;
mod input;
mod render;

pub use cli::{Cli, Command};
pub use config::{ClassroomConfig, ConfigError};
pub use driver::{Classroom, MatchEnd};
pub use input::{LineInput, ScriptedInput, StdinInput};
