//! Full-board check.
//!
//! A full board does not end a match: cells can still be stolen, so play
//! goes on until a line completes. Drivers use this only to hint that every
//! remaining move is a steal.

use super::super::Board;
use tracing::instrument;

/// Checks if every cell is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(Option::is_some)
}

#[cfg(test)]
mod tests {
    use super::super::super::{Position, Symbol};
    use super::super::win::check_winner;
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_full_board_without_line() {
        // X O X / X O O / O X X
        let layout = [
            Symbol::X, Symbol::O, Symbol::X,
            Symbol::X, Symbol::O, Symbol::O,
            Symbol::O, Symbol::X, Symbol::X,
        ];
        let mut board = Board::new();
        for (pos, symbol) in Position::ALL.into_iter().zip(layout) {
            board.set(pos, symbol);
        }
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), None);
    }
}
