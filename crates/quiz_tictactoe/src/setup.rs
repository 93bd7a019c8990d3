//! Match setup validation.
//!
//! Teams and questions are checked here, once, before a match starts. The
//! engine and the dispenser trust what comes out of [`MatchSetup::validate`].

use super::question::Question;
use super::types::{MAX_TEAMS, MIN_TEAMS, RosterSizeError, TeamRoster};
use derive_more::{Display, From};
use tracing::{info, instrument, warn};

/// Fewest playable questions a match accepts.
pub const MIN_QUESTIONS: usize = 9;

/// Team names offered when none are typed in.
pub const DEFAULT_TEAM_NAMES: [&str; MAX_TEAMS] = [
    "Diamond Team",
    "Oriole Team",
    "Eagle Team",
    "Shark Team",
    "Lion Team",
];

/// Reason a setup was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SetupError {
    /// Team count outside 2-5.
    #[display("{}", _0)]
    TeamCount(RosterSizeError),

    /// A team name is empty.
    #[display("Team {} has no name", _0 + 1)]
    #[from(ignore)]
    BlankTeamName(usize),

    /// Not enough questions with content.
    #[display("At least {} questions are needed, got {}", MIN_QUESTIONS, _0)]
    #[from(ignore)]
    TooFewQuestions(usize),
}

impl std::error::Error for SetupError {}

/// Teams and questions as entered, before validation.
#[derive(Debug, Clone, Default)]
pub struct MatchSetup {
    team_names: Vec<String>,
    questions: Vec<Question>,
}

/// Setup that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedSetup {
    /// Teams in turn order.
    pub roster: TeamRoster,
    /// Playable questions.
    pub questions: Vec<Question>,
}

impl MatchSetup {
    /// Creates an empty setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a team.
    pub fn team(mut self, name: impl Into<String>) -> Self {
        self.team_names.push(name.into());
        self
    }

    /// Adds several teams.
    pub fn teams<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.team_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Uses the first `count` default team names.
    pub fn default_teams(self, count: usize) -> Self {
        self.teams(DEFAULT_TEAM_NAMES.iter().take(count).copied())
    }

    /// Sets the question list.
    pub fn questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Checks the setup.
    ///
    /// Questions with blank content are dropped before counting, as an
    /// unfilled editor slot is not a question.
    ///
    /// # Errors
    ///
    /// [`SetupError::TeamCount`] for fewer than 2 or more than 5 teams,
    /// [`SetupError::BlankTeamName`] for an empty name,
    /// [`SetupError::TooFewQuestions`] for fewer than 9 questions.
    #[instrument(skip(self), fields(teams = self.team_names.len(), questions = self.questions.len()))]
    pub fn validate(self) -> Result<ValidatedSetup, SetupError> {
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&self.team_names.len()) {
            warn!("Team count rejected");
            return Err(RosterSizeError { count: self.team_names.len() }.into());
        }
        if let Some(blank) = self.team_names.iter().position(|n| n.trim().is_empty()) {
            warn!(team = blank, "Blank team name rejected");
            return Err(SetupError::BlankTeamName(blank));
        }
        let roster = TeamRoster::from_names(self.team_names.iter().map(|n| n.trim().to_string()))?;

        let total = self.questions.len();
        let questions: Vec<_> = self.questions.into_iter().filter(|q| !q.is_blank()).collect();
        if questions.len() < MIN_QUESTIONS {
            warn!(playable = questions.len(), "Too few questions");
            return Err(SetupError::TooFewQuestions(questions.len()));
        }

        info!(
            teams = roster.len(),
            questions = questions.len(),
            dropped = total - questions.len(),
            "Setup validated"
        );
        Ok(ValidatedSetup { roster, questions })
    }
}
