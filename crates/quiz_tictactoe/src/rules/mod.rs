//! Board rules for quiz tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board), kept apart from the engine
//! so drivers can ask the same questions the engine asks.

pub mod full;
pub mod steal;
pub mod win;

pub use full::is_full;
pub use steal::is_steal;
pub use win::{LINES, Line, check_winner};
