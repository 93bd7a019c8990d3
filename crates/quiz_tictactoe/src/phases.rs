//! Match phases and outcomes.

use super::rules::Line;
use super::types::Team;
use serde::{Deserialize, Serialize};

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
pub enum GameState {
    /// Teams and questions not yet supplied.
    #[default]
    Setup,
    /// Teams take turns claiming cells.
    Playing,
    /// A line was completed.
    Winner,
    /// Full board without a line.
    ///
    /// No engine operation produces this phase: stealing keeps a full board
    /// playable, so a match only ends on a completed line.
    Draw,
}

/// How a match was won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Team whose claim completed the line.
    pub team: Team,
    /// The completed line.
    pub line: Line,
    /// Turn index of the winning claim.
    pub turn_index: u64,
}

impl std::fmt::Display for Win {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins with {}", self.team.name, self.line.symbol)
    }
}
