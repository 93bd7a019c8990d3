//! Core domain types for quiz tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Symbol written into a cell.
///
/// Symbols belong to turns, not to teams: the symbol of a turn is decided by
/// the parity of the turn index alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Symbol {
    /// Even turns.
    X,
    /// Odd turns.
    O,
}

impl Symbol {
    /// Returns the symbol played on the given turn index.
    #[instrument]
    pub fn for_turn(turn_index: u64) -> Self {
        if turn_index % 2 == 0 {
            Symbol::X
        } else {
            Symbol::O
        }
    }
}

/// 3x3 board, cells in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Symbol>; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the occupant of a cell.
    pub fn get(&self, pos: Position) -> Option<Symbol> {
        self.cells[pos.index()]
    }

    /// Writes a symbol into a cell, returning the previous occupant.
    pub(crate) fn set(&mut self, pos: Position, symbol: Symbol) -> Option<Symbol> {
        self.cells[pos.index()].replace(symbol)
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Option<Symbol>; 9] {
        &self.cells
    }

    /// Returns true when no cell is occupied.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Formats the board as text, empty cells showing their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                match self.cells[idx] {
                    Some(symbol) => result.push_str(&symbol.to_string()),
                    None => result.push_str(&(idx + 1).to_string()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// A competing team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Team {
    /// Position of the team in the roster.
    pub id: u32,
    /// Display name.
    pub name: String,
}

/// Fewest teams a match accepts.
pub const MIN_TEAMS: usize = 2;

/// Most teams a match accepts.
pub const MAX_TEAMS: usize = 5;

/// Roster size outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("A match needs 2 to 5 teams, got {count}")]
pub struct RosterSizeError {
    /// Number of teams supplied.
    pub count: usize,
}

/// Ordered teams of a match, between [`MIN_TEAMS`] and [`MAX_TEAMS`] long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    teams: Vec<Team>,
}

impl TeamRoster {
    /// Builds a roster, rejecting sizes outside the accepted range.
    #[instrument(skip(teams), fields(count = teams.len()))]
    pub fn new(teams: Vec<Team>) -> Result<Self, RosterSizeError> {
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&teams.len()) {
            return Err(RosterSizeError { count: teams.len() });
        }
        Ok(Self { teams })
    }

    /// Builds a roster from names, numbering teams from 0.
    pub fn from_names<I, S>(names: I) -> Result<Self, RosterSizeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Team::new(i as u32, name.into()))
            .collect();
        Self::new(teams)
    }

    /// Returns the team whose turn it is at `turn_index`.
    pub fn team_for_turn(&self, turn_index: u64) -> &Team {
        &self.teams[(turn_index % self.teams.len() as u64) as usize]
    }

    /// Returns the teams in turn order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Always false; a roster holds at least [`MIN_TEAMS`] teams.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
