//! Quiz tic-tac-toe - classroom game core
//!
//! Teams take turns on a shared 3x3 board. To write into a cell, the team
//! first answers a timed multiple-choice question: a correct answer claims
//! the cell (overwriting the other symbol if it holds one), anything else
//! passes the turn. The first completed line wins.
//!
//! # Architecture
//!
//! - **Engine**: board, turn pointer and win detection ([`TurnEngine`])
//! - **Dispenser**: random questions without repeats inside a lap
//! - **Quiz**: one attempt's countdown state machine ([`QuizSession`]) and
//!   its real-time driver ([`QuizClock`])
//! - **Context**: one match, tying the above together ([`MatchContext`])
//!
//! # Example
//!
//! ```no_run
//! use quiz_tictactoe::{MatchContext, MatchSetup, QuizClock, QuizTiming, find_theme};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let theme = find_theme("Mathematics").ok_or("missing theme")?;
//! let setup = MatchSetup::new()
//!     .teams(["Red", "Blue"])
//!     .questions(theme.questions())
//!     .validate()?;
//!
//! let mut context = MatchContext::new(QuizTiming::default());
//! context.start(setup)?;
//!
//! let session = context.select_cell(4)?;
//! let (answers, mut rx) = mpsc::unbounded_channel();
//! answers.send(0)?;
//! let resolution = QuizClock::new(context.timing().clone())
//!     .run(session, &mut rx, None)
//!     .await?;
//! context.resolve_attempt(&resolution)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod clock;
mod context;
mod dispenser;
mod engine;
pub mod invariants;
mod phases;
mod position;
mod question;
mod quiz;
pub mod rules;
mod setup;
mod snapshot;
mod source;
mod themes;
mod types;

// Crate-level exports - Board and turns
pub use action::{ClaimOutcome, EngineError};
pub use engine::TurnEngine;
pub use phases::{GameState, Win};
pub use position::Position;
pub use types::{Board, MAX_TEAMS, MIN_TEAMS, RosterSizeError, Symbol, Team, TeamRoster};

// Crate-level exports - Questions
pub use dispenser::{DispenserError, QuestionDispenser};
pub use question::{
    OPTION_COUNT, Question, QuestionDraft, QuestionError, QuestionId, option_label, parse_option,
};
pub use source::{JsonFileSource, QuestionSource, SourceError, parse_questions};
pub use themes::{Theme, builtin_themes, find_theme};

// Crate-level exports - Quiz sessions
pub use clock::{QuizClock, QuizEvent};
pub use quiz::{QuizError, QuizPhase, QuizSession, QuizTiming, Resolution, Tick};

// Crate-level exports - Match lifecycle
pub use context::{AttemptOutcome, MatchContext, MatchError, PendingAttempt};
pub use setup::{DEFAULT_TEAM_NAMES, MIN_QUESTIONS, MatchSetup, ValidatedSetup, SetupError};
pub use snapshot::MatchSnapshot;
