//! Reads quiz documents into validated `QuizData`.

use std::fs;
use std::path::Path;

use quiz_core::model::{QuizData, QuizDraft, QuizKey};
use tracing::info;

use crate::error::QuizLoadError;

/// Parse a quiz document.
///
/// # Errors
///
/// Returns `QuizLoadError::Json` for malformed JSON and `QuizLoadError::Quiz`
/// when the document parses but fails validation.
pub fn quiz_from_str(raw: &str) -> Result<QuizData, QuizLoadError> {
    let draft: QuizDraft = serde_json::from_str(raw)?;
    Ok(draft.validate()?)
}

/// Read and parse the quiz document at `path`.
///
/// # Errors
///
/// Returns `QuizLoadError::Io` if the file cannot be read, otherwise as
/// [`quiz_from_str`].
pub fn load_quiz_from_path(path: &Path) -> Result<QuizData, QuizLoadError> {
    let raw = fs::read_to_string(path)?;
    let quiz = quiz_from_str(&raw)?;
    info!(
        path = %path.display(),
        title = quiz.title(),
        questions = quiz.len(),
        "quiz loaded"
    );
    Ok(quiz)
}

/// Storage key for progress and history of the quiz at `path`: its file stem.
#[must_use]
pub fn quiz_key_for_path(path: &Path) -> QuizKey {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| QuizKey::new(stem))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{OptionKey, QuestionId, QuizError};
    use std::path::PathBuf;

    const DOC: &str = r#"{
        "title": "Capitals",
        "timeLimit": 90,
        "questions": [
            {
                "id": 1,
                "question": "Capital of France?",
                "options": [
                    {"key": "A", "text": "Paris"},
                    {"key": "b", "text": "Lyon"}
                ],
                "correctAnswer": "A",
                "explanation": "Paris has been the capital since 987."
            },
            {
                "id": 2,
                "question": "Capital of Italy?",
                "options": [
                    {"key": "A", "text": "Milan"},
                    {"key": "B", "text": "Rome"}
                ],
                "correctAnswer": "b"
            }
        ]
    }"#;

    #[test]
    fn parses_a_complete_document() {
        let quiz = quiz_from_str(DOC).unwrap();
        assert_eq!(quiz.title(), "Capitals");
        assert_eq!(quiz.time_limit_secs(), Some(90));
        assert_eq!(quiz.len(), 2);
        let second = quiz.question_by_id(QuestionId::new(2)).unwrap();
        assert_eq!(second.correct_answer(), OptionKey::B);
        assert!(second.explanation().is_none());
        assert!(quiz.questions()[0].has_option(OptionKey::B));
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = quiz_from_str(r#"{"title": "Nothing", "questions": []}"#).unwrap_err();
        assert!(matches!(err, QuizLoadError::Quiz(QuizError::Empty)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = quiz_from_str("{ not json").unwrap_err();
        assert!(matches!(err, QuizLoadError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_quiz_from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, QuizLoadError::Io(_)));
    }

    #[test]
    fn quiz_key_comes_from_file_stem() {
        assert_eq!(
            quiz_key_for_path(&PathBuf::from("/tmp/chapter-3.json")).as_str(),
            "chapter-3"
        );
        assert_eq!(quiz_key_for_path(Path::new("/")).as_str(), "quiz");
    }
}
