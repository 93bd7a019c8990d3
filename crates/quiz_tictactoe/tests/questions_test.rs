//! Loading question sets from disk and the bundled themes.

use quiz_tictactoe::{
    JsonFileSource, MIN_QUESTIONS, MatchSetup, QuestionDraft, QuestionId, QuestionSource,
    SetupError, SourceError, builtin_themes,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

fn drafts(count: usize) -> Vec<QuestionDraft> {
    (0..count)
        .map(|i| QuestionDraft {
            content: format!("What is {i} + 1?"),
            options: vec![
                (i + 1).to_string(),
                i.to_string(),
                (i + 2).to_string(),
                "none".into(),
            ],
            correct_index: 0,
        })
        .collect()
}

#[test]
fn test_generated_drafts_load_and_validate() {
    let json = serde_json::to_string(&drafts(10)).expect("json");
    let file = write_file(&json);

    let source = JsonFileSource::new(file.path());
    let questions = source.load().expect("load");
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[9].id(), QuestionId(9));
    assert!(source.label().ends_with(&*file.path().file_name().expect("name").to_string_lossy()));

    let setup = MatchSetup::new()
        .default_teams(2)
        .questions(questions)
        .validate()
        .expect("setup");
    assert_eq!(setup.questions.len(), 10);
}

#[test]
fn test_short_file_fails_setup() {
    let json = serde_json::to_string(&drafts(MIN_QUESTIONS - 1)).expect("json");
    let file = write_file(&json);
    let questions = JsonFileSource::new(file.path()).load().expect("load");

    let err = MatchSetup::new()
        .default_teams(2)
        .questions(questions)
        .validate()
        .unwrap_err();
    assert_eq!(err, SetupError::TooFewQuestions(MIN_QUESTIONS - 1));
}

#[test]
fn test_bad_entry_names_the_question() {
    let file = write_file(
        r#"[{"id": 5, "content": "Pick one", "options": ["a", "b", "c", "d"], "correctIndex": 4}]"#,
    );
    let err = JsonFileSource::new(file.path()).load().unwrap_err();
    assert!(matches!(err, SourceError::Question(_)));
    assert!(err.to_string().contains("Question 5"));
}

#[test]
fn test_themes_feed_a_match() {
    for theme in builtin_themes() {
        let questions = theme.load().expect("theme");
        let setup = MatchSetup::new()
            .default_teams(5)
            .questions(questions)
            .validate()
            .expect("setup");
        assert_eq!(setup.roster.len(), 5);
    }
}
