//! Text shown to the class.

use quiz_tictactoe::{
    Board, GameState, MatchSnapshot, Question, QuizSession, Resolution, Win, option_label, rules,
};

/// Board plus whose turn it is.
pub fn turn(board: &Board, snapshot: &MatchSnapshot) -> String {
    let mut text = format!("\n{}\n\n", board.display());
    if rules::is_full(board) {
        text.push_str("The board is full: every move is a steal.\n");
    }
    if let Some(team) = snapshot.current_team() {
        text.push_str(&format!(
            "{} to play ({}). Pick a cell 1-9, or `quit`.",
            team.name,
            snapshot.current_symbol()
        ));
    }
    text
}

/// The question and its options.
pub fn question(session: &QuizSession, seconds: u32) -> String {
    let mut text = String::new();
    if session.is_steal() {
        text.push_str("STEAL ATTEMPT! Answer right to take the cell.\n");
    }
    text.push_str(&format!("{}\n", session.question().content()));
    for (i, option) in session.question().options().iter().enumerate() {
        text.push_str(&format!("  {}) {}\n", option_label(i), option));
    }
    text.push_str(&format!("Answer A-D within {} seconds.", seconds));
    text
}

/// Countdown notice, shown every ten seconds and every second once time is
/// critical.
pub fn countdown(seconds_remaining: u32, critical: bool) -> Option<String> {
    if critical {
        Some(format!("{}!", seconds_remaining))
    } else if seconds_remaining % 10 == 0 {
        Some(format!("{} seconds left", seconds_remaining))
    } else {
        None
    }
}

/// Verdict of a locked answer.
pub fn verdict(selected: Option<usize>, correct: bool) -> String {
    match (selected, correct) {
        (None, _) => "Time's up! The turn passes.".to_string(),
        (Some(_), true) => "Correct! The cell is yours.".to_string(),
        (Some(i), false) => format!("{} is wrong. The turn passes.", option_label(i)),
    }
}

/// Correct answer, shown after a miss.
pub fn correct_answer(question: &Question) -> String {
    let index = question.correct_index();
    format!(
        "The answer was {}) {}",
        option_label(index),
        question.options()[index]
    )
}

/// Resolution summary for the log line under the board.
pub fn resolution(resolution: &Resolution) -> String {
    match (resolution.correct, resolution.is_steal) {
        (true, true) => "Cell stolen.".to_string(),
        (true, false) => "Cell claimed.".to_string(),
        (false, _) => "No change on the board.".to_string(),
    }
}

/// End-of-match banner.
pub fn game_over(board: &Board, state: GameState, win: Option<&Win>) -> String {
    let headline = match (state, win) {
        (GameState::Winner, Some(win)) => format!("{} WINS! ({})", win.team.name, win.line.symbol),
        (GameState::Draw, _) => "Draw.".to_string(),
        _ => "Match over.".to_string(),
    };
    format!(
        "\n{}\n\n{}\nType `again` for a new match or `quit` to leave.",
        board.display(),
        headline
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_cadence() {
        assert_eq!(countdown(40, false).as_deref(), Some("40 seconds left"));
        assert_eq!(countdown(39, false), None);
        assert_eq!(countdown(7, true).as_deref(), Some("7!"));
    }

    #[test]
    fn test_verdicts() {
        assert!(verdict(None, false).contains("Time's up"));
        assert!(verdict(Some(0), true).contains("Correct"));
        assert!(verdict(Some(2), false).starts_with("C is wrong"));
    }
}
