//! Board positions.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board (index 0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Board index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position for a board index, `None` past 8.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a 1-based cell number as typed by a player ("1" to "9").
    #[instrument]
    pub fn from_cell_number(s: &str) -> Option<Self> {
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Self::from_index(n - 1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
        assert_eq!(Position::from_index(4), Some(Position::Center));
        assert_eq!(Position::from_index(9), None);
        assert!(Position::iter().eq(Position::ALL));
    }

    #[test]
    fn test_cell_numbers_are_one_based() {
        assert_eq!(Position::from_cell_number("1"), Some(Position::TopLeft));
        assert_eq!(Position::from_cell_number(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::from_cell_number("0"), None);
        assert_eq!(Position::from_cell_number("10"), None);
        assert_eq!(Position::from_cell_number("A"), None);
    }
}
