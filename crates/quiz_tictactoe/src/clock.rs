//! Cooperative countdown driving a quiz session.
//!
//! The clock owns the session while it runs. Ticks come from a tokio
//! interval and answers from a channel; the interval is dropped as soon as
//! the session leaves the answering phase, so no tick can reach a locked
//! session.

use super::quiz::{QuizError, QuizPhase, QuizSession, QuizTiming, Resolution, Tick};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, instrument, warn};

/// Progress of a running session, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// One second passed.
    Tick {
        /// Seconds left.
        seconds_remaining: u32,
        /// Whether the remaining time is critical.
        critical: bool,
    },
    /// An option was rejected because it does not exist.
    InvalidOption(usize),
    /// The session locked.
    Locked {
        /// Option chosen, `None` on timeout.
        selected: Option<usize>,
        /// Whether it was correct.
        correct: bool,
    },
    /// The session resolved.
    Resolved(Resolution),
}

/// Runs quiz sessions in real time.
#[derive(Debug, Clone, Default)]
pub struct QuizClock {
    timing: QuizTiming,
}

impl QuizClock {
    /// Creates a clock with the given timing.
    pub fn new(timing: QuizTiming) -> Self {
        Self { timing }
    }

    /// The clock's timing.
    pub fn timing(&self) -> &QuizTiming {
        &self.timing
    }

    /// Runs `session` to resolution.
    ///
    /// Counts down once per tick while reading answers from `answers`. An
    /// answer arriving together with a tick is taken first. A closed answer
    /// channel lets the countdown run out. After locking, waits the reveal
    /// delay and resolves.
    ///
    /// # Errors
    ///
    /// Propagates [`QuizError`] if the session was already resolved.
    #[instrument(skip_all, fields(question = %session.question().id()))]
    pub async fn run(
        &self,
        mut session: QuizSession,
        answers: &mut mpsc::UnboundedReceiver<usize>,
        events: Option<&mpsc::UnboundedSender<QuizEvent>>,
    ) -> Result<Resolution, QuizError> {
        let emit = |event: QuizEvent| {
            if let Some(tx) = events {
                // A driver that stopped listening does not stop the clock.
                let _ = tx.send(event);
            }
        };

        if session.is_answering() {
            let period = *self.timing.tick();
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut answers_open = true;

            while session.is_answering() {
                tokio::select! {
                    biased;

                    answer = answers.recv(), if answers_open => match answer {
                        Some(option) => match session.select(option) {
                            Ok(_) => {}
                            Err(QuizError::InvalidOption(option)) => {
                                emit(QuizEvent::InvalidOption(option));
                            }
                            Err(e) => warn!(error = %e, "Answer rejected"),
                        },
                        None => {
                            debug!("Answer channel closed, waiting for timeout");
                            answers_open = false;
                        }
                    },

                    _ = ticker.tick() => {
                        if let Tick::Counted { seconds_remaining } = session.tick() {
                            emit(QuizEvent::Tick {
                                seconds_remaining,
                                critical: session.is_time_critical(&self.timing),
                            });
                        }
                    }
                }
            }
            // Stop counting the moment the session locks.
            drop(ticker);
        }

        if let QuizPhase::Locked { selected, correct } = session.phase() {
            emit(QuizEvent::Locked { selected, correct });
        }

        time::sleep(session.reveal_delay(&self.timing)).await;

        let resolution = session.resolve()?;
        debug!(correct = resolution.correct, timed_out = resolution.timed_out, "Quiz finished");
        emit(QuizEvent::Resolved(resolution.clone()));
        Ok(resolution)
    }
}
