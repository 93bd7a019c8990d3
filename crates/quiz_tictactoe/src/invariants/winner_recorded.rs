//! Winner recorded invariant: the winner phase, the recorded win and the
//! board agree.

use super::super::{GameState, TurnEngine};
use super::Invariant;

/// Invariant: a winner is recorded exactly in the winner phase, and the
/// recorded line is still on the board.
pub struct WinnerRecordedInvariant;

impl Invariant<TurnEngine> for WinnerRecordedInvariant {
    fn holds(engine: &TurnEngine) -> bool {
        match (engine.state(), engine.winner()) {
            (GameState::Winner, Some(win)) => win
                .line
                .cells
                .iter()
                .all(|pos| engine.board().get(*pos) == Some(win.line.symbol)),
            (GameState::Winner, None) => false,
            (_, Some(_)) => false,
            (_, None) => true,
        }
    }

    fn description() -> &'static str {
        "A winner is recorded exactly when the match is won, with its line on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameState, TeamRoster};

    #[test]
    fn test_winner_phase_without_record_violates() {
        let mut engine = TurnEngine::new();
        engine
            .start(TeamRoster::from_names(["A", "B"]).unwrap())
            .unwrap();
        engine.state = GameState::Winner;
        assert!(!WinnerRecordedInvariant::holds(&engine));
    }

    #[test]
    fn test_real_win_holds() {
        let mut engine = TurnEngine::new();
        engine
            .start(TeamRoster::from_names(["A", "B"]).unwrap())
            .unwrap();
        for cell in [3, 0, 4, 1, 5] {
            engine.claim_cell(cell).unwrap();
        }
        assert_eq!(engine.state(), GameState::Winner);
        assert!(WinnerRecordedInvariant::holds(&engine));
    }
}
