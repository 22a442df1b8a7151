use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{AttemptRecord, QuizKey};
use storage::repository::{AttemptRepository, AttemptRow};

use crate::Clock;
use crate::error::AttemptServiceError;

/// Storage identifier for a persisted attempt (`SQLite` row id).
pub type AttemptId = i64;

/// Presentation-agnostic list item for a past attempt.
///
/// No pre-formatted strings; the UI formats timestamps and percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptListItem {
    pub id: AttemptId,
    pub completed_at: DateTime<Utc>,
    pub correct: u32,
    pub total: u32,
    pub elapsed_secs: u32,
    pub timed_out: bool,
}

impl AttemptListItem {
    #[must_use]
    pub fn from_row(row: &AttemptRow) -> Self {
        let attempt = &row.attempt;
        Self {
            id: row.id,
            completed_at: attempt.completed_at(),
            correct: attempt.correct(),
            total: attempt.total(),
            elapsed_secs: attempt.elapsed_secs(),
            timed_out: attempt.timed_out(),
        }
    }
}

/// Read side of the attempt history, hiding repositories and time from the UI.
#[derive(Clone)]
pub struct AttemptHistoryService {
    clock: Clock,
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptHistoryService {
    #[must_use]
    pub fn new(clock: Clock, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { clock, attempts }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(storage::repository::InMemoryRepository::new()),
        )
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Most recent attempts for `key`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` on repository failures.
    pub async fn list_recent(
        &self,
        key: &QuizKey,
        limit: u32,
    ) -> Result<Vec<AttemptListItem>, AttemptServiceError> {
        let rows = self.attempts.list_attempts(key, limit).await?;
        Ok(rows.iter().map(AttemptListItem::from_row).collect())
    }

    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` if the attempt is missing or unreadable.
    pub async fn get_attempt(&self, id: AttemptId) -> Result<AttemptRecord, AttemptServiceError> {
        Ok(self.attempts.get_attempt(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::UserAnswers;
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, StorageError};

    fn attempt(key: &QuizKey, offset_secs: i64, correct: u32) -> AttemptRecord {
        let started = fixed_now() + Duration::seconds(offset_secs);
        AttemptRecord::from_persisted(
            key.clone(),
            "History".into(),
            started,
            started + Duration::seconds(30),
            30,
            correct,
            3,
            false,
            UserAnswers::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_recent_attempts_for_one_quiz() {
        let repo = Arc::new(InMemoryRepository::new());
        let key = QuizKey::new("hist").unwrap();
        let other = QuizKey::new("other").unwrap();
        repo.append_attempt(&attempt(&key, 0, 1)).await.unwrap();
        let newest = repo.append_attempt(&attempt(&key, 100, 3)).await.unwrap();
        repo.append_attempt(&attempt(&other, 200, 2)).await.unwrap();

        let history = AttemptHistoryService::new(fixed_clock(), repo);
        let items = history.list_recent(&key, 10).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, newest);
        assert_eq!(items[0].correct, 3);
        assert_eq!(items[1].correct, 1);

        let limited = history.list_recent(&key, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn missing_attempt_is_a_storage_error() {
        let history = AttemptHistoryService::in_memory(fixed_clock());
        let err = history.get_attempt(42).await.unwrap_err();
        assert!(matches!(
            err,
            AttemptServiceError::Storage(StorageError::NotFound)
        ));
        assert_eq!(history.now(), fixed_now());
    }
}
