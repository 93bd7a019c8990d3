//! Steal detection.

use super::super::{Board, Position, Symbol};
use tracing::instrument;

/// True when claiming `pos` with `symbol` would overwrite the other symbol.
#[instrument(skip(board))]
pub fn is_steal(board: &Board, pos: Position, symbol: Symbol) -> bool {
    matches!(board.get(pos), Some(occupant) if occupant != symbol)
}
