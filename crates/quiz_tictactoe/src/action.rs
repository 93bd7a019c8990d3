//! Results and errors of engine operations.
//!
//! Claims and misses are the only two ways a resolved attempt reaches the
//! engine; both report what they did so drivers never re-derive it.

use super::phases::{GameState, Win};
use super::position::Position;
use super::types::Symbol;
use serde::{Deserialize, Serialize};

/// Result of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimOutcome {
    /// The cell was written and play moves to the next turn.
    Continue {
        /// Cell written.
        position: Position,
        /// Symbol written.
        symbol: Symbol,
        /// Occupant before the claim; `Some` of the other symbol for a steal.
        previous: Option<Symbol>,
        /// Turn index after the claim.
        turn_index: u64,
    },
    /// The claim completed a line and ended the match.
    Won(Win),
}

impl ClaimOutcome {
    /// Returns the win, if the claim ended the match.
    pub fn win(&self) -> Option<&Win> {
        match self {
            ClaimOutcome::Won(win) => Some(win),
            ClaimOutcome::Continue { .. } => None,
        }
    }
}

/// Error returned when an engine operation is called out of place.
///
/// The engine state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Claim or miss attempted outside the playing phase.
    #[display("Match is not being played (state: {})", _0)]
    NotPlaying(GameState),

    /// Start attempted on a match that already started.
    #[display("Match already started (state: {})", _0)]
    AlreadyStarted(GameState),

    /// Cell index past 8.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    CellOutOfRange(usize),
}

impl std::error::Error for EngineError {}
