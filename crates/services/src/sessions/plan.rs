use rand::rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use quiz_core::model::{Question, QuizData, QuizSettings};

use crate::error::SessionError;

/// Questions and time budget chosen for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub quiz: Arc<QuizData>,
    pub allocated_secs: u32,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz.len()
    }
}

/// Applies `QuizSettings` to a loaded quiz: optional shuffle, then the
/// question limit, then the time allocation over what is left.
pub struct SessionBuilder<'a> {
    quiz: &'a QuizData,
    settings: &'a QuizSettings,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(quiz: &'a QuizData, settings: &'a QuizSettings) -> Self {
        Self { quiz, settings }
    }

    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if the trimmed quiz fails validation.
    pub fn build(self) -> Result<SessionPlan, SessionError> {
        let mut questions: Vec<Question> = self.quiz.questions().to_vec();
        if self.settings.shuffle() {
            let mut rng = rng();
            questions.as_mut_slice().shuffle(&mut rng);
        }
        if let Some(limit) = self.settings.question_limit() {
            questions.truncate(limit);
        }

        // A question limit makes the quiz's own whole-quiz budget meaningless.
        let trimmed = questions.len() < self.quiz.len();
        let time_limit = if trimmed {
            None
        } else {
            self.quiz.time_limit_secs()
        };

        let quiz = if !self.settings.shuffle() && !trimmed {
            self.quiz.clone()
        } else {
            self.quiz.with_questions(questions, time_limit)?
        };
        let allocated_secs = self.settings.allocated_secs(&quiz);

        Ok(SessionPlan {
            quiz: Arc::new(quiz),
            allocated_secs,
        })
    }
}
