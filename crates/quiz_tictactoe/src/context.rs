//! Match context: one match's engine, question pool and pending attempt.
//!
//! Drivers talk to the core through this type. A claim attempt is two calls:
//! [`MatchContext::select_cell`] hands out a quiz session, and
//! [`MatchContext::resolve_attempt`] feeds its verdict back to the engine.

use super::action::{ClaimOutcome, EngineError};
use super::dispenser::{DispenserError, QuestionDispenser};
use super::engine::TurnEngine;
use super::phases::GameState;
use super::position::Position;
use super::question::{Question, QuestionId};
use super::quiz::{QuizSession, QuizTiming, Resolution};
use super::setup::ValidatedSetup;
use super::snapshot::MatchSnapshot;
use derive_more::{Display, From};
use tracing::{debug, info, instrument, warn};

/// Error returned by a match operation. State is untouched when returned.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum MatchError {
    /// Engine rejected the operation.
    #[display("{}", _0)]
    Engine(EngineError),

    /// Question set could not be installed.
    #[display("{}", _0)]
    Dispenser(DispenserError),

    /// No question set installed yet.
    #[display("No questions loaded")]
    NoQuestions,

    /// A cell was selected while another attempt is running.
    #[display("An attempt on cell {} is still running", _0)]
    #[from(ignore)]
    AttemptPending(Position),

    /// A verdict arrived with no attempt running.
    #[display("No attempt is running")]
    NoPendingAttempt,

    /// A verdict arrived for a different question than the one asked.
    #[display("Verdict for question {} does not match question {}", got, expected)]
    QuestionMismatch {
        /// Question of the running attempt.
        expected: QuestionId,
        /// Question named by the verdict.
        got: QuestionId,
    },
}

impl std::error::Error for MatchError {}

/// Claim attempt between cell selection and verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAttempt {
    /// Targeted cell.
    pub position: Position,
    /// Question asked.
    pub question_id: QuestionId,
    /// Whether the cell holds the other symbol.
    pub is_steal: bool,
}

/// What a verdict did to the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Correct answer: the cell was claimed.
    Claimed(ClaimOutcome),
    /// Wrong answer or time up: the turn passed.
    Missed {
        /// Turn index after the miss.
        turn_index: u64,
    },
}

impl AttemptOutcome {
    /// True if the attempt ended the match.
    pub fn is_win(&self) -> bool {
        matches!(self, AttemptOutcome::Claimed(ClaimOutcome::Won(_)))
    }
}

/// State of one match.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    engine: TurnEngine,
    dispenser: Option<QuestionDispenser>,
    timing: QuizTiming,
    seed: Option<u64>,
    pending: Option<PendingAttempt>,
}

impl MatchContext {
    /// Creates a context in the setup phase.
    #[instrument(skip(timing))]
    pub fn new(timing: QuizTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Draws questions from a fixed seed instead of system entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Installs a question set, replacing any previous one.
    ///
    /// # Errors
    ///
    /// [`MatchError::Dispenser`] for an empty list.
    #[instrument(skip(self, questions), fields(count = questions.len()))]
    pub fn on_questions_ready(&mut self, questions: Vec<Question>) -> Result<(), MatchError> {
        match self.dispenser.as_mut() {
            Some(dispenser) => dispenser.replace_set(questions)?,
            None => {
                let dispenser = match self.seed {
                    Some(seed) => QuestionDispenser::seeded(questions, seed)?,
                    None => QuestionDispenser::new(questions)?,
                };
                self.dispenser = Some(dispenser);
            }
        }
        debug!("Question set installed");
        Ok(())
    }

    /// Starts a match with a validated setup.
    ///
    /// # Errors
    ///
    /// [`MatchError::Engine`] if a match is already running.
    #[instrument(skip(self, setup), fields(teams = setup.roster.len()))]
    pub fn start(&mut self, setup: ValidatedSetup) -> Result<(), MatchError> {
        if self.engine.state() != GameState::Setup {
            return Err(EngineError::AlreadyStarted(self.engine.state()).into());
        }
        self.on_questions_ready(setup.questions)?;
        self.engine.start(setup.roster)?;
        info!("Match context started");
        Ok(())
    }

    /// Opens a claim attempt on a cell and returns its quiz session.
    ///
    /// # Errors
    ///
    /// [`MatchError::Engine`] outside play or for a cell past 8,
    /// [`MatchError::AttemptPending`] while another attempt runs,
    /// [`MatchError::NoQuestions`] without a question set.
    #[instrument(skip(self), fields(turn_index = self.engine.turn_index()))]
    pub fn select_cell(&mut self, index: usize) -> Result<QuizSession, MatchError> {
        if self.engine.state() != GameState::Playing {
            return Err(EngineError::NotPlaying(self.engine.state()).into());
        }
        if let Some(pending) = self.pending {
            warn!(cell = %pending.position, "Selection rejected, attempt running");
            return Err(MatchError::AttemptPending(pending.position));
        }
        let position = Position::from_index(index).ok_or(EngineError::CellOutOfRange(index))?;
        let dispenser = self.dispenser.as_mut().ok_or(MatchError::NoQuestions)?;

        let is_steal = self.engine.is_steal(position);
        let question = dispenser.draw();
        self.pending = Some(PendingAttempt {
            position,
            question_id: question.id(),
            is_steal,
        });
        info!(%position, is_steal, question = %question.id(), "Attempt opened");
        Ok(QuizSession::new(question, *self.timing.answer_seconds(), is_steal))
    }

    /// Applies a session's verdict to the engine.
    ///
    /// A correct answer claims the pending cell; anything else misses the
    /// turn.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoPendingAttempt`] with no attempt running,
    /// [`MatchError::QuestionMismatch`] for another question's verdict.
    #[instrument(skip(self), fields(correct = resolution.correct))]
    pub fn resolve_attempt(&mut self, resolution: &Resolution) -> Result<AttemptOutcome, MatchError> {
        let pending = self.pending.ok_or(MatchError::NoPendingAttempt)?;
        if pending.question_id != resolution.question_id {
            warn!(expected = %pending.question_id, got = %resolution.question_id, "Verdict mismatch");
            return Err(MatchError::QuestionMismatch {
                expected: pending.question_id,
                got: resolution.question_id,
            });
        }

        let outcome = if resolution.correct {
            AttemptOutcome::Claimed(self.engine.claim_cell(pending.position.index())?)
        } else {
            AttemptOutcome::Missed {
                turn_index: self.engine.miss_turn()?,
            }
        };
        self.pending = None;
        debug!(?outcome, "Attempt resolved");
        Ok(outcome)
    }

    /// Drops the running attempt without touching the engine.
    #[instrument(skip(self))]
    pub fn abandon_attempt(&mut self) -> Option<PendingAttempt> {
        let pending = self.pending.take();
        if let Some(pending) = &pending {
            debug!(cell = %pending.position, "Attempt abandoned");
        }
        pending
    }

    /// Returns to setup, discarding the question pool and any attempt.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.engine.reset();
        self.dispenser = None;
        self.pending = None;
        info!("Match context reset");
    }

    /// Read model of the match.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self)
    }

    /// The engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Quiz timing used for new sessions.
    pub fn timing(&self) -> &QuizTiming {
        &self.timing
    }

    /// The running attempt.
    pub fn pending(&self) -> Option<&PendingAttempt> {
        self.pending.as_ref()
    }

    /// The question pool, once installed.
    pub fn dispenser(&self) -> Option<&QuestionDispenser> {
        self.dispenser.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::MatchSetup;
    use crate::types::Symbol;

    fn questions() -> Vec<Question> {
        (0..9)
            .map(|i| {
                Question::new(
                    QuestionId(i),
                    format!("Question {i}"),
                    ["a".into(), "b".into(), "c".into(), "d".into()],
                    0,
                )
                .unwrap()
            })
            .collect()
    }

    fn started() -> MatchContext {
        let setup = MatchSetup::new()
            .teams(["A", "B"])
            .questions(questions())
            .validate()
            .unwrap();
        let mut context = MatchContext::new(QuizTiming::default()).with_seed(11);
        context.start(setup).unwrap();
        context
    }

    fn answer(context: &mut MatchContext, index: usize, option: usize) -> AttemptOutcome {
        let mut session = context.select_cell(index).unwrap();
        session.select(option).unwrap();
        let resolution = session.resolve().unwrap();
        context.resolve_attempt(&resolution).unwrap()
    }

    #[test]
    fn test_select_before_start_rejected() {
        let mut context = MatchContext::default();
        assert_eq!(
            context.select_cell(0).unwrap_err(),
            MatchError::Engine(EngineError::NotPlaying(GameState::Setup))
        );
    }

    #[test]
    fn test_second_selection_rejected_while_pending() {
        let mut context = started();
        context.select_cell(0).unwrap();
        assert_eq!(
            context.select_cell(1).unwrap_err(),
            MatchError::AttemptPending(Position::TopLeft)
        );
    }

    #[test]
    fn test_correct_answer_claims_wrong_answer_misses() {
        let mut context = started();
        let claimed = answer(&mut context, 4, 0);
        assert!(matches!(claimed, AttemptOutcome::Claimed(ClaimOutcome::Continue { .. })));
        assert_eq!(context.engine().board().get(Position::Center), Some(Symbol::X));

        let missed = answer(&mut context, 0, 2);
        assert_eq!(missed, AttemptOutcome::Missed { turn_index: 2 });
        assert_eq!(context.engine().board().get(Position::TopLeft), None);
        assert!(context.pending().is_none());
    }

    #[test]
    fn test_steal_flag_follows_board() {
        let mut context = started();
        answer(&mut context, 4, 0);
        let session = context.select_cell(4).unwrap();
        assert!(session.is_steal());
        assert!(context.pending().unwrap().is_steal);
    }

    #[test]
    fn test_resolve_without_attempt_rejected() {
        let mut context = started();
        let mut session = context.select_cell(0).unwrap();
        session.select(0).unwrap();
        let resolution = session.resolve().unwrap();
        context.abandon_attempt();

        assert_eq!(
            context.resolve_attempt(&resolution).unwrap_err(),
            MatchError::NoPendingAttempt
        );
        assert_eq!(context.engine().turn_index(), 0);
    }

    #[test]
    fn test_reset_drops_pool_and_attempt() {
        let mut context = started();
        context.select_cell(0).unwrap();
        context.reset();

        assert_eq!(context.engine().state(), GameState::Setup);
        assert!(context.pending().is_none());
        assert!(context.dispenser().is_none());
        assert_eq!(
            context.select_cell(0).unwrap_err(),
            MatchError::Engine(EngineError::NotPlaying(GameState::Setup))
        );
    }
}
