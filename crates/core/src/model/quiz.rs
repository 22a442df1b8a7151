use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

pub const UNTITLED_QUIZ: &str = "Untitled quiz";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question id {id} appears more than once")]
    DuplicateQuestion { id: QuestionId },

    #[error("time limit must be > 0 seconds")]
    ZeroTimeLimit,

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Unvalidated quiz as produced by the extraction step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<QuestionDraft>,
    #[serde(default)]
    pub time_limit: Option<u32>,
}

impl QuizDraft {
    /// Validate every question and the quiz-level rules.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for an empty question list, duplicate ids, a zero
    /// time limit, or any invalid question.
    pub fn validate(self) -> Result<QuizData, QuizError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        QuizData::new(self.title, questions, self.time_limit)
    }
}

/// A loaded quiz. Question order is display and navigation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizData {
    title: String,
    questions: Vec<Question>,
    time_limit_secs: Option<u32>,
}

impl QuizData {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when `questions` is empty,
    /// `QuizError::DuplicateQuestion` when two questions share an id, and
    /// `QuizError::ZeroTimeLimit` for `Some(0)`.
    pub fn new(
        title: impl Into<String>,
        questions: Vec<Question>,
        time_limit_secs: Option<u32>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        if time_limit_secs == Some(0) {
            return Err(QuizError::ZeroTimeLimit);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestion { id: question.id() });
            }
        }

        let title = title.into();
        let title = match title.trim() {
            "" => UNTITLED_QUIZ.to_owned(),
            trimmed => trimmed.to_owned(),
        };

        Ok(Self {
            title,
            questions,
            time_limit_secs,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.time_limit_secs
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_by_id(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    #[must_use]
    pub fn index_of(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id() == id)
    }

    /// Rebuild the quiz around a new question sequence (reordered or trimmed).
    ///
    /// # Errors
    ///
    /// Same rules as [`QuizData::new`].
    pub fn with_questions(
        &self,
        questions: Vec<Question>,
        time_limit_secs: Option<u32>,
    ) -> Result<Self, QuizError> {
        Self::new(self.title.clone(), questions, time_limit_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::OptionDraft;

    fn question(id: u64) -> QuestionDraft {
        QuestionDraft {
            id,
            question: format!("Q{id}"),
            options: vec![
                OptionDraft {
                    key: "A".into(),
                    text: "yes".into(),
                },
                OptionDraft {
                    key: "B".into(),
                    text: "no".into(),
                },
            ],
            correct_answer: "A".into(),
            explanation: None,
        }
    }

    #[test]
    fn draft_validates_into_quiz() {
        let quiz = QuizDraft {
            title: " Biology ".into(),
            questions: vec![question(10), question(3)],
            time_limit: Some(120),
        }
        .validate()
        .unwrap();

        assert_eq!(quiz.title(), "Biology");
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.last_index(), 1);
        assert_eq!(quiz.index_of(QuestionId::new(3)), Some(1));
        assert_eq!(quiz.time_limit_secs(), Some(120));
    }

    #[test]
    fn blank_title_falls_back() {
        let quiz = QuizDraft {
            title: String::new(),
            questions: vec![question(1)],
            time_limit: None,
        }
        .validate()
        .unwrap();
        assert_eq!(quiz.title(), UNTITLED_QUIZ);
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        let empty = QuizDraft::default().validate();
        assert_eq!(empty.unwrap_err(), QuizError::Empty);

        let dup = QuizDraft {
            title: "t".into(),
            questions: vec![question(1), question(1)],
            time_limit: None,
        }
        .validate();
        assert_eq!(
            dup.unwrap_err(),
            QuizError::DuplicateQuestion {
                id: QuestionId::new(1)
            }
        );
    }

    #[test]
    fn rejects_zero_time_limit() {
        let err = QuizDraft {
            title: "t".into(),
            questions: vec![question(1)],
            time_limit: Some(0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuizError::ZeroTimeLimit);
    }
}
