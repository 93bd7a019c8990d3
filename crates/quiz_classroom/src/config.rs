//! Classroom configuration.
//!
//! Read from an optional TOML file, then overridden by command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use quiz_tictactoe::{
    DEFAULT_TEAM_NAMES, JsonFileSource, QuestionSource, QuizTiming, find_theme,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for a classroom session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClassroomConfig {
    /// Built-in theme to play.
    #[serde(default)]
    theme: Option<String>,

    /// Question file; takes precedence over `theme`.
    #[serde(default)]
    questions: Option<PathBuf>,

    /// Team names in turn order.
    #[serde(default)]
    teams: Vec<String>,

    /// Seed for question draws.
    #[serde(default)]
    seed: Option<u64>,

    /// Quiz timing.
    #[serde(default)]
    timing: QuizTiming,
}

#[instrument]
fn default_theme() -> &'static str {
    "Mathematics"
}

impl ClassroomConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(teams = config.teams.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line flags over the file settings.
    ///
    /// A theme flag clears a configured question file and the other way
    /// round; teams replace the configured list when any are given.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        theme: Option<String>,
        questions: Option<PathBuf>,
        teams: Vec<String>,
        seed: Option<u64>,
    ) -> Self {
        if theme.is_some() {
            self.theme = theme;
            self.questions = None;
        }
        if questions.is_some() {
            self.questions = questions;
            self.theme = None;
        }
        if !teams.is_empty() {
            self.teams = teams;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Team names to play with; two default teams when none are set.
    pub fn team_names(&self) -> Vec<String> {
        if self.teams.is_empty() {
            DEFAULT_TEAM_NAMES[..2].iter().map(|s| s.to_string()).collect()
        } else {
            self.teams.clone()
        }
    }

    /// Where the questions come from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a theme name that is not bundled.
    #[instrument(skip(self))]
    pub fn question_source(&self) -> Result<Box<dyn QuestionSource>, ConfigError> {
        if let Some(path) = &self.questions {
            return Ok(Box::new(JsonFileSource::new(path)));
        }
        let name = self.theme.as_deref().unwrap_or(default_theme());
        let theme =
            find_theme(name).ok_or_else(|| ConfigError::new(format!("Unknown theme: {}", name)))?;
        Ok(Box::new(theme))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
