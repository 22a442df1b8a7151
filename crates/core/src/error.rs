use thiserror::Error;

use crate::model::{AttemptError, QuestionError, QuizError, QuizSettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
