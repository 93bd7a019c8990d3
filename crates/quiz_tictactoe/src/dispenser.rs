//! Question dispenser: random draws without repetition inside a lap.
//!
//! The pool starts as a copy of the full set. Each draw removes one question
//! at a uniformly random index; an empty pool is refilled from the full set
//! before the next draw, which starts a new lap.

use super::question::Question;
use derive_more::Display;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Error raised by the dispenser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DispenserError {
    /// No questions to draw from.
    #[display("Question set is empty")]
    EmptyQuestionSet,
}

impl std::error::Error for DispenserError {}

/// Hands out one question per claim attempt.
#[derive(Debug, Clone)]
pub struct QuestionDispenser<R = StdRng> {
    full_set: Vec<Question>,
    pool: Vec<Question>,
    lap: u32,
    rng: R,
}

impl QuestionDispenser<StdRng> {
    /// Creates a dispenser seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`DispenserError::EmptyQuestionSet`] for an empty set.
    #[instrument(skip(full_set), fields(questions = full_set.len()))]
    pub fn new(full_set: Vec<Question>) -> Result<Self, DispenserError> {
        Self::with_rng(full_set, StdRng::from_entropy())
    }

    /// Creates a dispenser with a fixed seed, for reproducible matches.
    #[instrument(skip(full_set), fields(questions = full_set.len()))]
    pub fn seeded(full_set: Vec<Question>, seed: u64) -> Result<Self, DispenserError> {
        Self::with_rng(full_set, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionDispenser<R> {
    /// Creates a dispenser drawing with `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`DispenserError::EmptyQuestionSet`] for an empty set.
    pub fn with_rng(full_set: Vec<Question>, rng: R) -> Result<Self, DispenserError> {
        if full_set.is_empty() {
            return Err(DispenserError::EmptyQuestionSet);
        }
        Ok(Self {
            pool: full_set.clone(),
            full_set,
            lap: 0,
            rng,
        })
    }

    /// Replaces the question set, discarding the current lap.
    ///
    /// # Errors
    ///
    /// Returns [`DispenserError::EmptyQuestionSet`] for an empty set and
    /// keeps the previous set.
    #[instrument(skip(self, full_set), fields(questions = full_set.len()))]
    pub fn replace_set(&mut self, full_set: Vec<Question>) -> Result<(), DispenserError> {
        if full_set.is_empty() {
            return Err(DispenserError::EmptyQuestionSet);
        }
        self.pool = full_set.clone();
        self.full_set = full_set;
        self.lap = 0;
        debug!("Question set replaced");
        Ok(())
    }

    /// Draws the next question.
    ///
    /// No question repeats until every question of the set has been drawn.
    #[instrument(skip(self), fields(remaining = self.pool.len(), lap = self.lap))]
    pub fn draw(&mut self) -> Question {
        if self.pool.is_empty() {
            self.pool = self.full_set.clone();
            self.lap += 1;
            debug!(lap = self.lap, "Pool exhausted, starting a new lap");
        }
        let index = self.rng.gen_range(0..self.pool.len());
        let question = self.pool.swap_remove(index);
        debug!(question = %question.id(), "Question drawn");
        question
    }

    /// Questions left in the current lap.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Completed laps over the full set.
    pub fn lap(&self) -> u32 {
        self.lap
    }

    /// The full question set.
    pub fn full_set(&self) -> &[Question] {
        &self.full_set
    }
}
