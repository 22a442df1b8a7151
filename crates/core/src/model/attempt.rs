use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::answers::UserAnswers;
use crate::model::ids::QuizKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct count ({correct}) exceeds question count ({total})")]
    CountMismatch { correct: u32, total: u32 },

    #[error("attempt has no questions")]
    Empty,
}

/// Result of one submitted session, as kept in the attempt history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    quiz_key: QuizKey,
    title: String,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    elapsed_secs: u32,
    correct: u32,
    total: u32,
    timed_out: bool,
    answers: UserAnswers,
}

impl AttemptRecord {
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidTimeRange` if `completed_at < started_at`,
    /// `AttemptError::Empty` for a zero total, and
    /// `AttemptError::CountMismatch` if `correct > total`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        quiz_key: QuizKey,
        title: String,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        elapsed_secs: u32,
        correct: u32,
        total: u32,
        timed_out: bool,
        answers: UserAnswers,
    ) -> Result<Self, AttemptError> {
        if completed_at < started_at {
            return Err(AttemptError::InvalidTimeRange);
        }
        if total == 0 {
            return Err(AttemptError::Empty);
        }
        if correct > total {
            return Err(AttemptError::CountMismatch { correct, total });
        }

        Ok(Self {
            quiz_key,
            title,
            started_at,
            completed_at,
            elapsed_secs,
            correct,
            total,
            timed_out,
            answers,
        })
    }

    #[must_use]
    pub fn quiz_key(&self) -> &QuizKey {
        &self.quiz_key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    #[must_use]
    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }
}
