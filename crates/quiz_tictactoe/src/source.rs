//! Question sources.
//!
//! A source hands the core a finished question list. How the list was
//! produced (a bundled bank, a file on disk, a generator) stays on the
//! source's side of the boundary.

use super::question::{Question, QuestionError, QuestionId};
use derive_more::{Display, From};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Error loading questions.
#[derive(Debug, Display, From)]
pub enum SourceError {
    /// File could not be read.
    #[display("Failed to read {}: {}", path.display(), source)]
    #[from(ignore)]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Text is not a JSON question array.
    #[display("Invalid question JSON: {}", _0)]
    Json(serde_json::Error),

    /// An entry is not a valid question.
    #[display("{}", _0)]
    Question(QuestionError),
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Json(e) => Some(e),
            SourceError::Question(e) => Some(e),
        }
    }
}

/// Something that can produce a question list.
pub trait QuestionSource {
    /// Human-readable name of the source.
    fn label(&self) -> String;

    /// Produces the questions.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the questions cannot be produced.
    fn load(&self) -> Result<Vec<Question>, SourceError>;
}

/// Entry of a question file; the id is optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    #[serde(default)]
    id: Option<QuestionId>,
    content: String,
    options: Vec<String>,
    correct_index: usize,
}

/// Parses a JSON array of questions.
///
/// Entries without an `id` take their position in the array as id.
///
/// # Errors
///
/// [`SourceError::Json`] for malformed JSON, [`SourceError::Question`] for
/// an entry with the wrong option count or a bad correct index.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_questions(text: &str) -> Result<Vec<Question>, SourceError> {
    let entries: Vec<FileEntry> = serde_json::from_str(text)?;
    let questions = entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            let id = entry.id.unwrap_or(QuestionId(position as u64));
            Question::from_options(id, entry.content, entry.options, entry.correct_index)
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = questions.len(), "Questions parsed");
    Ok(questions)
}

/// Questions stored in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for JsonFileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<Question>, SourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let questions = parse_questions(&text)?;
        info!(count = questions.len(), "Question file loaded");
        Ok(questions)
    }
}

/// An in-memory question list.
impl QuestionSource for Vec<Question> {
    fn label(&self) -> String {
        format!("{} questions", self.len())
    }

    fn load(&self) -> Result<Vec<Question>, SourceError> {
        Ok(self.clone())
    }
}
