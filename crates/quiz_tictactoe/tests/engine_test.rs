//! Turn engine properties: parity, rotation, steals and wins.

use proptest::prelude::*;
use quiz_tictactoe::rules::{LINES, is_full};
use quiz_tictactoe::{ClaimOutcome, GameState, Position, Symbol, TeamRoster, TurnEngine};
use strum::IntoEnumIterator;

fn playing(teams: usize) -> TurnEngine {
    let names = ["A", "B", "C", "D", "E"];
    let mut engine = TurnEngine::new();
    engine
        .start(TeamRoster::from_names(names.iter().take(teams).copied()).expect("roster"))
        .expect("start");
    engine
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Claim(usize),
    Miss,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0usize..9).prop_map(Op::Claim), Just(Op::Miss)]
}

proptest! {
    #[test]
    fn turn_index_drives_symbol_and_team(teams in 2usize..=5, ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = playing(teams);

        for op in ops {
            if engine.state() != GameState::Playing {
                break;
            }
            let before = engine.turn_index();
            let team = engine.current_team().expect("team").clone();
            prop_assert_eq!(engine.current_symbol(), if before % 2 == 0 { Symbol::X } else { Symbol::O });
            prop_assert_eq!(team.id as u64, before % teams as u64);

            match op {
                Op::Miss => {
                    let board = engine.board().clone();
                    prop_assert_eq!(engine.miss_turn().expect("miss"), before + 1);
                    prop_assert_eq!(engine.board(), &board);
                }
                Op::Claim(cell) => {
                    let symbol = engine.current_symbol();
                    match engine.claim_cell(cell).expect("claim") {
                        ClaimOutcome::Continue { turn_index, .. } => {
                            prop_assert_eq!(turn_index, before + 1);
                            prop_assert_eq!(engine.state(), GameState::Playing);
                        }
                        ClaimOutcome::Won(win) => {
                            prop_assert_eq!(&win.team, &team);
                            prop_assert_eq!(win.line.symbol, symbol);
                            prop_assert_eq!(engine.turn_index(), before);
                            prop_assert_eq!(engine.state(), GameState::Winner);
                        }
                    }
                    let position = Position::from_index(cell).expect("cell");
                    prop_assert_eq!(engine.board().get(position), Some(symbol));
                }
            }
        }

        prop_assert_ne!(engine.state(), GameState::Draw);
    }
}

/// Writes `symbol` into the line's cells, the other turns passing.
fn complete_line(engine: &mut TurnEngine, line: [Position; 3], symbol: Symbol) -> ClaimOutcome {
    if engine.current_symbol() != symbol {
        engine.miss_turn().expect("miss");
    }
    let [a, b, c] = line;
    for cell in [a, b] {
        let outcome = engine.claim_cell(cell.index()).expect("claim");
        assert!(outcome.win().is_none(), "line finished early");
        engine.miss_turn().expect("miss");
    }
    engine.claim_cell(c.index()).expect("claim")
}

#[test]
fn test_every_line_wins_for_x() {
    for line in LINES {
        let mut engine = playing(2);
        let outcome = complete_line(&mut engine, line, Symbol::X);
        let win = outcome.win().expect("win");
        assert_eq!(win.team.name, "A");
        assert_eq!(win.line.cells, line);
        assert_eq!(win.turn_index % 2, 0);
        assert_eq!(engine.state(), GameState::Winner);
    }
}

#[test]
fn test_every_line_wins_for_o() {
    for line in LINES {
        let mut engine = playing(3);
        let outcome = complete_line(&mut engine, line, Symbol::O);
        let win = outcome.win().expect("win");
        // O wins on turn 5: team 5 % 3.
        assert_eq!(win.turn_index, 5);
        assert_eq!(win.team.name, "C");
        assert_eq!(win.line.symbol, Symbol::O);
    }
}

#[test]
fn test_full_board_without_line_keeps_playing() {
    let mut engine = playing(2);
    // X O X / X O O / O X X
    for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        let outcome = engine.claim_cell(cell).expect("claim");
        assert!(outcome.win().is_none());
    }
    assert!(is_full(engine.board()));
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.turn_index(), 9);

    // Every move is now a steal.
    assert!(Position::iter().any(|p| engine.is_steal(p)));
    assert!(engine.claim_cell(0).is_ok());
}

#[test]
fn test_steal_can_break_a_line_in_progress() {
    let mut engine = playing(2);
    engine.claim_cell(0).expect("X");
    engine.claim_cell(0).expect("O steals");
    engine.claim_cell(1).expect("X");
    engine.miss_turn().expect("O misses");
    engine.claim_cell(2).expect("X");
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.board().get(Position::TopLeft), Some(Symbol::O));
}
