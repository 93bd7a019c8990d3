//! Board and turn engine.
//!
//! Owns the grid, the turn pointer and the roster. Every operation is a pure
//! state transition; the engine never asks questions or waits for answers.

use super::action::{ClaimOutcome, EngineError};
use super::invariants::{EngineInvariants, InvariantSet};
use super::phases::{GameState, Win};
use super::position::Position;
use super::rules;
use super::types::{Board, Symbol, Team, TeamRoster};
use tracing::{debug, info, instrument, warn};

/// Turn-based engine for one match.
///
/// The turn index is the single source of truth for whose turn it is and
/// which symbol is played: the team cycles through the roster while the
/// symbol alternates X, O independently of the roster length.
#[derive(Debug, Clone, Default)]
pub struct TurnEngine {
    pub(crate) board: Board,
    pub(crate) turn_index: u64,
    pub(crate) roster: Option<TeamRoster>,
    pub(crate) state: GameState,
    pub(crate) winner: Option<Win>,
}

impl TurnEngine {
    /// Creates an engine in the setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a match with the given teams.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyStarted`] outside the setup phase.
    #[instrument(skip(self, roster), fields(teams = roster.len()))]
    pub fn start(&mut self, roster: TeamRoster) -> Result<(), EngineError> {
        if self.state != GameState::Setup {
            warn!(state = %self.state, "Start requested on a started match");
            return Err(EngineError::AlreadyStarted(self.state));
        }
        self.board = Board::new();
        self.turn_index = 0;
        self.roster = Some(roster);
        self.winner = None;
        self.state = GameState::Playing;
        info!("Match started");
        self.assert_invariants();
        Ok(())
    }

    /// Claims a cell for the current turn, overwriting any occupant.
    ///
    /// A claim that completes a line ends the match with the current team as
    /// winner and leaves the turn index where it was. Any other claim advances
    /// the turn index by one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotPlaying`] outside the playing phase and
    /// [`EngineError::CellOutOfRange`] for an index past 8.
    #[instrument(skip(self), fields(turn_index = self.turn_index))]
    pub fn claim_cell(&mut self, index: usize) -> Result<ClaimOutcome, EngineError> {
        let roster = match (&self.roster, self.state) {
            (Some(roster), GameState::Playing) => roster,
            _ => {
                warn!(state = %self.state, "Claim rejected");
                return Err(EngineError::NotPlaying(self.state));
            }
        };
        let position = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Claim rejected: cell out of range");
            EngineError::CellOutOfRange(index)
        })?;

        let symbol = Symbol::for_turn(self.turn_index);
        let team = roster.team_for_turn(self.turn_index).clone();
        let previous = self.board.set(position, symbol);
        debug!(%position, %symbol, ?previous, team = %team.name, "Cell claimed");

        if let Some(line) = rules::check_winner(&self.board) {
            let win = Win {
                team,
                line,
                turn_index: self.turn_index,
            };
            info!(winner = %win.team.name, %symbol, "Line completed");
            self.winner = Some(win.clone());
            self.state = GameState::Winner;
            self.assert_invariants();
            return Ok(ClaimOutcome::Won(win));
        }

        self.turn_index += 1;
        self.assert_invariants();
        Ok(ClaimOutcome::Continue {
            position,
            symbol,
            previous,
            turn_index: self.turn_index,
        })
    }

    /// Passes the turn without touching the board.
    ///
    /// Returns the new turn index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotPlaying`] outside the playing phase.
    #[instrument(skip(self), fields(turn_index = self.turn_index))]
    pub fn miss_turn(&mut self) -> Result<u64, EngineError> {
        if self.state != GameState::Playing {
            warn!(state = %self.state, "Miss rejected");
            return Err(EngineError::NotPlaying(self.state));
        }
        self.turn_index += 1;
        debug!(turn_index = self.turn_index, "Turn missed");
        self.assert_invariants();
        Ok(self.turn_index)
    }

    /// Clears the board, the turn index, the roster and any winner.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Match reset");
        self.assert_invariants();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn index.
    pub fn turn_index(&self) -> u64 {
        self.turn_index
    }

    /// Returns the teams, `None` during setup.
    pub fn roster(&self) -> Option<&TeamRoster> {
        self.roster.as_ref()
    }

    /// Returns the match phase.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns how the match was won, once it was.
    pub fn winner(&self) -> Option<&Win> {
        self.winner.as_ref()
    }

    /// Symbol of the current turn.
    pub fn current_symbol(&self) -> Symbol {
        Symbol::for_turn(self.turn_index)
    }

    /// Team of the current turn, `None` during setup.
    pub fn current_team(&self) -> Option<&Team> {
        self.roster
            .as_ref()
            .map(|roster| roster.team_for_turn(self.turn_index))
    }

    /// True when claiming `pos` now would overwrite the other symbol.
    pub fn is_steal(&self, pos: Position) -> bool {
        rules::is_steal(&self.board, pos, self.current_symbol())
    }

    fn assert_invariants(&self) {
        debug_assert!(
            EngineInvariants::check_all(self).is_ok(),
            "Engine invariants violated: {:?}",
            EngineInvariants::check_all(self).err()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(names: &[&str]) -> TurnEngine {
        let mut engine = TurnEngine::new();
        engine
            .start(TeamRoster::from_names(names.iter().copied()).unwrap())
            .unwrap();
        engine
    }

    #[test]
    fn test_new_engine_is_in_setup() {
        let engine = TurnEngine::new();
        assert_eq!(engine.state(), GameState::Setup);
        assert!(engine.board().is_clear());
        assert!(engine.current_team().is_none());
    }

    #[test]
    fn test_claim_rejected_before_start() {
        let mut engine = TurnEngine::new();
        assert_eq!(
            engine.claim_cell(0),
            Err(EngineError::NotPlaying(GameState::Setup))
        );
        assert_eq!(engine.miss_turn(), Err(EngineError::NotPlaying(GameState::Setup)));
        assert_eq!(engine.turn_index(), 0);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut engine = playing(&["A", "B"]);
        let again = engine.start(TeamRoster::from_names(["C", "D"]).unwrap());
        assert_eq!(again, Err(EngineError::AlreadyStarted(GameState::Playing)));
        assert_eq!(engine.current_team().unwrap().name, "A");
    }

    #[test]
    fn test_out_of_range_claim_leaves_state() {
        let mut engine = playing(&["A", "B"]);
        assert_eq!(engine.claim_cell(9), Err(EngineError::CellOutOfRange(9)));
        assert_eq!(engine.turn_index(), 0);
        assert!(engine.board().is_clear());
    }

    #[test]
    fn test_claim_empty_cell_advances_turn() {
        let mut engine = playing(&["A", "B"]);
        let outcome = engine.claim_cell(4).unwrap();
        assert_eq!(
            outcome,
            ClaimOutcome::Continue {
                position: Position::Center,
                symbol: Symbol::X,
                previous: None,
                turn_index: 1,
            }
        );
        assert_eq!(engine.current_symbol(), Symbol::O);
        assert_eq!(engine.current_team().unwrap().name, "B");
    }

    #[test]
    fn test_steal_overwrites_occupant() {
        let mut engine = playing(&["A", "B"]);
        engine.claim_cell(4).unwrap();
        assert!(engine.is_steal(Position::Center));

        let outcome = engine.claim_cell(4).unwrap();
        assert!(matches!(
            outcome,
            ClaimOutcome::Continue {
                previous: Some(Symbol::X),
                symbol: Symbol::O,
                ..
            }
        ));
        assert_eq!(engine.board().get(Position::Center), Some(Symbol::O));
    }

    #[test]
    fn test_miss_leaves_board() {
        let mut engine = playing(&["A", "B", "C"]);
        assert_eq!(engine.miss_turn(), Ok(1));
        assert!(engine.board().is_clear());
        assert_eq!(engine.current_team().unwrap().name, "B");
    }

    #[test]
    fn test_win_freezes_turn_and_rejects_further_moves() {
        let mut engine = playing(&["A", "B"]);
        // X: 0, 1, 2 on even turns; O misses in between.
        engine.claim_cell(0).unwrap();
        engine.miss_turn().unwrap();
        engine.claim_cell(1).unwrap();
        engine.miss_turn().unwrap();
        let outcome = engine.claim_cell(2).unwrap();

        let win = outcome.win().unwrap();
        assert_eq!(win.team.name, "A");
        assert_eq!(win.turn_index, 4);
        assert_eq!(engine.state(), GameState::Winner);
        assert_eq!(engine.turn_index(), 4);
        assert_eq!(engine.current_team().unwrap().name, "A");

        assert_eq!(
            engine.claim_cell(5),
            Err(EngineError::NotPlaying(GameState::Winner))
        );
        assert_eq!(engine.miss_turn(), Err(EngineError::NotPlaying(GameState::Winner)));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut engine = playing(&["A", "B"]);
        engine.claim_cell(0).unwrap();
        engine.miss_turn().unwrap();
        engine.reset();

        assert_eq!(engine.state(), GameState::Setup);
        assert_eq!(engine.turn_index(), 0);
        assert!(engine.board().is_clear());
        assert!(engine.roster().is_none());
        assert!(engine.winner().is_none());
    }
}
