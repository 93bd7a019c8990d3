//! Open board invariant: no completed line while the match is played.

use super::super::{GameState, TurnEngine, rules};
use super::Invariant;

/// Invariant: a playing match never shows a completed line.
///
/// The claim that completes a line ends the match in the same transition,
/// so a line on a playing board means a win went unnoticed.
pub struct OpenBoardInvariant;

impl Invariant<TurnEngine> for OpenBoardInvariant {
    fn holds(engine: &TurnEngine) -> bool {
        engine.state() != GameState::Playing || rules::check_winner(engine.board()).is_none()
    }

    fn description() -> &'static str {
        "A playing match has no completed line"
    }
}
