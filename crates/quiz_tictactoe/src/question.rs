//! Quiz questions.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Stable question identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

/// A multiple-choice question.
///
/// `content` and options may embed markup (for example LaTeX between `$`
/// signs); the core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQuestion")]
pub struct Question {
    id: QuestionId,
    content: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

/// Error building a question.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum QuestionError {
    /// Wrong number of options.
    #[display("Question {} has {} options, expected 4", id, found)]
    OptionCount {
        /// Offending question.
        id: QuestionId,
        /// Options supplied.
        found: usize,
    },

    /// Correct index does not name an option.
    #[display("Question {} marks option {} as correct, expected 0-3", id, index)]
    CorrectIndex {
        /// Offending question.
        id: QuestionId,
        /// Index supplied.
        index: usize,
    },
}

impl std::error::Error for QuestionError {}

impl Question {
    /// Creates a question, checking that `correct_index` names an option.
    #[instrument(skip(content, options))]
    pub fn new(
        id: QuestionId,
        content: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndex {
                id,
                index: correct_index,
            });
        }
        Ok(Self {
            id,
            content: content.into(),
            options,
            correct_index,
        })
    }

    /// Creates a question from an option list of any length.
    #[instrument(skip(content, options), fields(found = options.len()))]
    pub fn from_options(
        id: QuestionId,
        content: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let found = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { id, found })?;
        Self::new(id, content, options, correct_index)
    }

    /// Returns the identifier.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the question text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the four options in display order.
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// Returns the index of the correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Returns true if `index` is the correct option.
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    /// True when the text is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Letter shown next to an option ("A" to "D").
pub fn option_label(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Parses an option letter or 1-based number ("a", "B", "3").
#[instrument]
pub fn parse_option(s: &str) -> Option<usize> {
    let s = s.trim();
    let mut chars = s.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let index = match c.to_ascii_uppercase() {
        'A'..='D' => c.to_ascii_uppercase() as usize - 'A' as usize,
        '1'..='4' => c as usize - '1' as usize,
        _ => return None,
    };
    Some(index)
}

/// Question as it appears in JSON, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    id: QuestionId,
    content: String,
    options: Vec<String>,
    correct_index: usize,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::from_options(raw.id, raw.content, raw.options, raw.correct_index)
    }
}

/// Question without an identifier, as produced by generators and editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    /// Question text.
    pub content: String,
    /// Answer options; must be exactly four.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct_index: usize,
}

impl QuestionDraft {
    /// Validates the draft and assigns it an identifier.
    pub fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        Question::from_options(id, self.content, self.options, self.correct_index)
    }
}
