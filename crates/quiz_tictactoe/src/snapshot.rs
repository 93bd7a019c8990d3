//! Serializable read model of a match.

use super::context::MatchContext;
use super::phases::{GameState, Win};
use super::position::Position;
use super::types::{Symbol, Team};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Everything a driver shows, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Cells in row-major order.
    cells: Vec<Option<Symbol>>,
    /// Turn counter.
    turn_index: u64,
    /// Teams in turn order, empty during setup.
    teams: Vec<Team>,
    /// Match phase.
    state: GameState,
    /// How the match was won.
    winner: Option<Win>,
    /// Team to play.
    current_team: Option<Team>,
    /// Symbol to play.
    current_symbol: Symbol,
    /// Cell of the running attempt.
    pending_cell: Option<Position>,
    /// Questions left before the pool refills.
    questions_remaining: Option<usize>,
}

impl MatchSnapshot {
    pub(crate) fn capture(context: &MatchContext) -> Self {
        let engine = context.engine();
        Self {
            cells: engine.board().cells().to_vec(),
            turn_index: engine.turn_index(),
            teams: engine
                .roster()
                .map(|roster| roster.teams().to_vec())
                .unwrap_or_default(),
            state: engine.state(),
            winner: engine.winner().cloned(),
            current_team: engine.current_team().cloned(),
            current_symbol: engine.current_symbol(),
            pending_cell: context.pending().map(|p| p.position),
            questions_remaining: context.dispenser().map(|d| d.remaining()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuizTiming;

    #[test]
    fn test_setup_snapshot_serializes() {
        let snapshot = MatchContext::new(QuizTiming::default()).snapshot();
        assert_eq!(*snapshot.state(), GameState::Setup);
        assert!(snapshot.teams().is_empty());
        assert_eq!(snapshot.cells().len(), 9);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["current_symbol"], "X");
        assert_eq!(json["state"], "Setup");
    }
}
