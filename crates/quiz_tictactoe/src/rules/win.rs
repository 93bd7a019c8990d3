//! Win detection.

use super::super::{Board, Position, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning triples, rows then columns then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The three aligned cells.
    pub cells: [Position; 3],
    /// Symbol filling them.
    pub symbol: Symbol,
}

/// Returns the first completed line in [`LINES`] order, if any.
///
/// A single write can complete two lines at once; either one is reported,
/// both carry the same symbol.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Line> {
    LINES.iter().find_map(|&[a, b, c]| match board.get(a) {
        Some(symbol) if board.get(b) == Some(symbol) && board.get(c) == Some(symbol) => {
            Some(Line {
                cells: [a, b, c],
                symbol,
            })
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(Position, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(pos, symbol) in cells {
            board.set(pos, symbol);
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for cells in LINES {
            let board = board_with(&cells.map(|pos| (pos, Symbol::O)));
            assert_eq!(
                check_winner(&board),
                Some(Line {
                    cells,
                    symbol: Symbol::O
                })
            );
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[
            (Position::TopLeft, Symbol::X),
            (Position::TopCenter, Symbol::O),
            (Position::TopRight, Symbol::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_reported() {
        // X completes the top row and the left column with one cell.
        let board = board_with(&[
            (Position::TopLeft, Symbol::X),
            (Position::TopCenter, Symbol::X),
            (Position::TopRight, Symbol::X),
            (Position::MiddleLeft, Symbol::X),
            (Position::BottomLeft, Symbol::X),
        ]);
        let line = check_winner(&board).unwrap();
        assert_eq!(line.cells, LINES[0]);
        assert_eq!(line.symbol, Symbol::X);
    }
}
