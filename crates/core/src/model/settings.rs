use thiserror::Error;

use crate::model::quiz::QuizData;

/// Allocation used when neither the settings nor the quiz carry a time budget.
pub const DEFAULT_SECS_PER_QUESTION: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("time limit must be > 0 seconds")]
    ZeroTimeLimit,

    #[error("question limit must be > 0")]
    ZeroQuestionLimit,
}

/// Per-run choices made before the quiz starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: Option<u32>,
    question_limit: Option<usize>,
    shuffle: bool,
}

#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub time_limit_secs: Option<u32>,
    pub question_limit: Option<usize>,
    pub shuffle: bool,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `QuizSettingsError` when a limit is present but zero.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        if self.time_limit_secs == Some(0) {
            return Err(QuizSettingsError::ZeroTimeLimit);
        }
        if self.question_limit == Some(0) {
            return Err(QuizSettingsError::ZeroQuestionLimit);
        }

        Ok(QuizSettings {
            time_limit_secs: self.time_limit_secs,
            question_limit: self.question_limit,
            shuffle: self.shuffle,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u32> {
        self.time_limit_secs
    }

    #[must_use]
    pub fn question_limit(&self) -> Option<usize> {
        self.question_limit
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Seconds allocated for a session over `quiz` (already trimmed to the
    /// question limit).
    ///
    /// Override wins, then the quiz's own budget, then a per-question default.
    #[must_use]
    pub fn allocated_secs(&self, quiz: &QuizData) -> u32 {
        self.time_limit_secs
            .or(quiz.time_limit_secs())
            .unwrap_or_else(|| {
                let count = u32::try_from(quiz.len()).unwrap_or(u32::MAX);
                count.saturating_mul(DEFAULT_SECS_PER_QUESTION)
            })
    }
}
