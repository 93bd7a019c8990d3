//! Clear setup invariant: a match in setup has nothing on it.

use super::super::{GameState, TurnEngine};
use super::Invariant;

/// Invariant: setup means an empty board, turn 0, no roster, no winner.
pub struct ClearSetupInvariant;

impl Invariant<TurnEngine> for ClearSetupInvariant {
    fn holds(engine: &TurnEngine) -> bool {
        if engine.state() != GameState::Setup {
            return true;
        }
        engine.board().is_clear()
            && engine.turn_index() == 0
            && engine.roster().is_none()
            && engine.winner().is_none()
    }

    fn description() -> &'static str {
        "A match in setup has an empty board and turn index 0"
    }
}
