//! Timed quiz session state machine.
//!
//! A session lives for one claim attempt:
//! `Answering(seconds)` → `Locked(selected, correct)` → `Resolved(correct)`.
//! The first answer wins; ticks only count down while answering.

use super::question::{OPTION_COUNT, Question, QuestionId};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Timing of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct QuizTiming {
    /// Seconds a team has to answer.
    #[serde(default = "default_answer_seconds")]
    answer_seconds: u32,

    /// Real time per countdown second.
    #[serde(
        default = "default_tick",
        serialize_with = "millis::serialize",
        deserialize_with = "millis::deserialize_nonzero",
        rename = "tick_millis"
    )]
    tick: Duration,

    /// Pause showing the verdict after a manual answer.
    #[serde(
        default = "default_answer_reveal",
        with = "millis",
        rename = "answer_reveal_millis"
    )]
    answer_reveal: Duration,

    /// Pause showing the verdict after a timeout.
    #[serde(
        default = "default_timeout_reveal",
        with = "millis",
        rename = "timeout_reveal_millis"
    )]
    timeout_reveal: Duration,

    /// Remaining seconds at or below which time is shown as critical.
    #[serde(default = "default_critical_seconds")]
    critical_seconds: u32,
}

fn default_answer_seconds() -> u32 {
    45
}

fn default_tick() -> Duration {
    Duration::from_secs(1)
}

fn default_answer_reveal() -> Duration {
    Duration::from_millis(1800)
}

fn default_timeout_reveal() -> Duration {
    Duration::from_millis(1500)
}

fn default_critical_seconds() -> u32 {
    10
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }

    /// Rejects zero, which would make the countdown spin.
    pub fn deserialize_nonzero<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        match u64::deserialize(d)? {
            0 => Err(serde::de::Error::custom("tick_millis must be greater than zero")),
            millis => Ok(Duration::from_millis(millis)),
        }
    }
}

impl Default for QuizTiming {
    fn default() -> Self {
        Self {
            answer_seconds: default_answer_seconds(),
            tick: default_tick(),
            answer_reveal: default_answer_reveal(),
            timeout_reveal: default_timeout_reveal(),
            critical_seconds: default_critical_seconds(),
        }
    }
}

impl QuizTiming {
    /// Timing with the given answer time and default delays.
    pub fn with_answer_seconds(answer_seconds: u32) -> Self {
        Self {
            answer_seconds,
            ..Self::default()
        }
    }

    /// Timing without reveal pauses.
    pub fn without_reveal(mut self) -> Self {
        self.answer_reveal = Duration::ZERO;
        self.timeout_reveal = Duration::ZERO;
        self
    }
}

/// Phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Waiting for an answer.
    Answering {
        /// Seconds left on the clock.
        seconds_remaining: u32,
    },
    /// Answer recorded or time up; the verdict is being shown.
    Locked {
        /// Option chosen, `None` on timeout.
        selected: Option<usize>,
        /// Whether the chosen option is correct.
        correct: bool,
    },
    /// Verdict reported upstream. Terminal.
    Resolved {
        /// Whether the attempt succeeded.
        correct: bool,
    },
}

/// Effect of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown moved on.
    Counted {
        /// Seconds left after the tick.
        seconds_remaining: u32,
    },
    /// The countdown reached zero and the session locked.
    TimedOut,
    /// The session was not answering; nothing changed.
    Ignored,
}

/// Error returned by a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QuizError {
    /// An answer was already recorded, or time ran out.
    #[display("Answer already locked")]
    AlreadyLocked,

    /// Option index past the last option.
    #[display("Option {} does not exist", _0)]
    InvalidOption(usize),

    /// Resolution requested before the session locked.
    #[display("Session is still waiting for an answer")]
    NotLocked,

    /// Resolution requested twice.
    #[display("Session already resolved")]
    AlreadyResolved,
}

impl std::error::Error for QuizError {}

/// Final report of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Question asked.
    pub question_id: QuestionId,
    /// Option chosen, `None` on timeout.
    pub selected: Option<usize>,
    /// Whether the attempt succeeded.
    pub correct: bool,
    /// Whether the clock ran out.
    pub timed_out: bool,
    /// Whether the attempt targeted a cell held by the other symbol.
    pub is_steal: bool,
}

/// One claim attempt's question and countdown.
#[derive(Debug, Clone)]
pub struct QuizSession {
    question: Question,
    phase: QuizPhase,
    is_steal: bool,
}

impl QuizSession {
    /// Opens a session answering for `answer_seconds`.
    ///
    /// A session opened with no time is locked as timed out straight away.
    #[instrument(skip(question), fields(question = %question.id()))]
    pub fn new(question: Question, answer_seconds: u32, is_steal: bool) -> Self {
        let phase = if answer_seconds == 0 {
            QuizPhase::Locked {
                selected: None,
                correct: false,
            }
        } else {
            QuizPhase::Answering {
                seconds_remaining: answer_seconds,
            }
        };
        Self {
            question,
            phase,
            is_steal,
        }
    }

    /// Counts one second down.
    ///
    /// Reaching zero locks the session with no answer. Ticks outside the
    /// answering phase change nothing.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn tick(&mut self) -> Tick {
        let QuizPhase::Answering { seconds_remaining } = self.phase else {
            debug!("Tick ignored outside answering");
            return Tick::Ignored;
        };
        let seconds_remaining = seconds_remaining.saturating_sub(1);
        if seconds_remaining == 0 {
            self.phase = QuizPhase::Locked {
                selected: None,
                correct: false,
            };
            info!(question = %self.question.id(), "Time up");
            Tick::TimedOut
        } else {
            self.phase = QuizPhase::Answering { seconds_remaining };
            Tick::Counted { seconds_remaining }
        }
    }

    /// Records an answer. Returns whether it is correct.
    ///
    /// # Errors
    ///
    /// [`QuizError::AlreadyLocked`] once any answer or a timeout has been
    /// recorded; [`QuizError::InvalidOption`] for an index past the last
    /// option, which leaves the session answering.
    #[instrument(skip(self), fields(question = %self.question.id()))]
    pub fn select(&mut self, option: usize) -> Result<bool, QuizError> {
        if !self.is_answering() {
            warn!(option, "Answer rejected, session locked");
            return Err(QuizError::AlreadyLocked);
        }
        if option >= OPTION_COUNT {
            return Err(QuizError::InvalidOption(option));
        }
        let correct = self.question.is_correct(option);
        self.phase = QuizPhase::Locked {
            selected: Some(option),
            correct,
        };
        info!(option, correct, "Answer locked");
        Ok(correct)
    }

    /// Finishes a locked session and reports its verdict.
    ///
    /// # Errors
    ///
    /// [`QuizError::NotLocked`] while answering,
    /// [`QuizError::AlreadyResolved`] after a first resolution.
    #[instrument(skip(self), fields(question = %self.question.id()))]
    pub fn resolve(&mut self) -> Result<Resolution, QuizError> {
        match self.phase {
            QuizPhase::Answering { .. } => Err(QuizError::NotLocked),
            QuizPhase::Resolved { .. } => Err(QuizError::AlreadyResolved),
            QuizPhase::Locked { selected, correct } => {
                self.phase = QuizPhase::Resolved { correct };
                debug!(correct, "Session resolved");
                Ok(Resolution {
                    question_id: self.question.id(),
                    selected,
                    correct,
                    timed_out: selected.is_none(),
                    is_steal: self.is_steal,
                })
            }
        }
    }

    /// Pause before resolving: longer for a timeout than for an answer.
    pub fn reveal_delay(&self, timing: &QuizTiming) -> Duration {
        match self.phase {
            QuizPhase::Locked { selected: None, .. } => *timing.timeout_reveal(),
            _ => *timing.answer_reveal(),
        }
    }

    /// True while answering with no more than the critical seconds left.
    pub fn is_time_critical(&self, timing: &QuizTiming) -> bool {
        matches!(
            self.phase,
            QuizPhase::Answering { seconds_remaining } if seconds_remaining <= *timing.critical_seconds()
        )
    }

    /// True while waiting for an answer.
    pub fn is_answering(&self) -> bool {
        matches!(self.phase, QuizPhase::Answering { .. })
    }

    /// Seconds left, zero once locked.
    pub fn seconds_remaining(&self) -> u32 {
        match self.phase {
            QuizPhase::Answering { seconds_remaining } => seconds_remaining,
            _ => 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The question asked.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Whether the attempt targets a cell held by the other symbol.
    pub fn is_steal(&self) -> bool {
        self.is_steal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            QuestionId(5),
            "Smallest prime?",
            ["0".into(), "1".into(), "2".into(), "3".into()],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_session_starts_answering() {
        let session = QuizSession::new(question(), 45, false);
        assert_eq!(
            session.phase(),
            QuizPhase::Answering {
                seconds_remaining: 45
            }
        );
    }

    #[test]
    fn test_correct_answer_locks_and_resolves() {
        let mut session = QuizSession::new(question(), 45, true);
        assert_eq!(session.select(2), Ok(true));
        let resolution = session.resolve().unwrap();
        assert_eq!(
            resolution,
            Resolution {
                question_id: QuestionId(5),
                selected: Some(2),
                correct: true,
                timed_out: false,
                is_steal: true,
            }
        );
        assert_eq!(session.phase(), QuizPhase::Resolved { correct: true });
    }

    #[test]
    fn test_first_answer_wins() {
        let mut session = QuizSession::new(question(), 45, false);
        assert_eq!(session.select(0), Ok(false));
        assert_eq!(session.select(2), Err(QuizError::AlreadyLocked));
        assert_eq!(
            session.phase(),
            QuizPhase::Locked {
                selected: Some(0),
                correct: false
            }
        );
    }

    #[test]
    fn test_invalid_option_keeps_answering() {
        let mut session = QuizSession::new(question(), 45, false);
        assert_eq!(session.select(4), Err(QuizError::InvalidOption(4)));
        assert!(session.is_answering());
    }

    #[test]
    fn test_countdown_times_out() {
        let mut session = QuizSession::new(question(), 3, false);
        assert_eq!(session.tick(), Tick::Counted { seconds_remaining: 2 });
        assert_eq!(session.tick(), Tick::Counted { seconds_remaining: 1 });
        assert_eq!(session.tick(), Tick::TimedOut);
        assert_eq!(session.select(2), Err(QuizError::AlreadyLocked));

        let resolution = session.resolve().unwrap();
        assert!(!resolution.correct);
        assert!(resolution.timed_out);
    }

    #[test]
    fn test_tick_after_lock_is_ignored() {
        let mut session = QuizSession::new(question(), 45, false);
        session.select(2).unwrap();
        let before = session.phase();
        assert_eq!(session.tick(), Tick::Ignored);
        assert_eq!(session.phase(), before);
    }

    #[test]
    fn test_zero_seconds_starts_timed_out() {
        let mut session = QuizSession::new(question(), 0, false);
        assert!(!session.is_answering());
        assert!(session.resolve().unwrap().timed_out);
    }

    #[test]
    fn test_resolve_order_enforced() {
        let mut session = QuizSession::new(question(), 45, false);
        assert_eq!(session.resolve(), Err(QuizError::NotLocked));
        session.select(1).unwrap();
        session.resolve().unwrap();
        assert_eq!(session.resolve(), Err(QuizError::AlreadyResolved));
    }

    #[test]
    fn test_reveal_delay_depends_on_verdict() {
        let timing = QuizTiming::default();
        let mut answered = QuizSession::new(question(), 45, false);
        answered.select(1).unwrap();
        assert_eq!(answered.reveal_delay(&timing), Duration::from_millis(1800));

        let mut expired = QuizSession::new(question(), 1, false);
        expired.tick();
        assert_eq!(expired.reveal_delay(&timing), Duration::from_millis(1500));
    }

    #[test]
    fn test_time_critical_threshold() {
        let timing = QuizTiming::default();
        let mut session = QuizSession::new(question(), 11, false);
        assert!(!session.is_time_critical(&timing));
        session.tick();
        assert!(session.is_time_critical(&timing));
    }

    #[test]
    fn test_timing_reads_partial_config() {
        let timing: QuizTiming = serde_json::from_str(r#"{"answer_seconds": 30, "tick_millis": 250}"#).unwrap();
        assert_eq!(*timing.answer_seconds(), 30);
        assert_eq!(*timing.tick(), Duration::from_millis(250));
        assert_eq!(*timing.answer_reveal(), Duration::from_millis(1800));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = serde_json::from_str::<QuizTiming>(r#"{"tick_millis": 0}"#).unwrap_err();
        assert!(err.to_string().contains("tick_millis must be greater than zero"));

        // Zero reveal pauses stay allowed.
        let timing: QuizTiming = serde_json::from_str(r#"{"answer_reveal_millis": 0}"#).unwrap();
        assert_eq!(*timing.answer_reveal(), Duration::ZERO);
    }
}
