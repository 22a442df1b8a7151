use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::sessions::{AttemptHistoryService, QuizLoopService};

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    attempt_history: Arc<AttemptHistoryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over in-memory repositories.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&storage.snapshots),
            Arc::clone(&storage.attempts),
        ));
        let attempt_history = Arc::new(AttemptHistoryService::new(
            clock,
            Arc::clone(&storage.attempts),
        ));
        Self {
            quiz_loop,
            attempt_history,
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.attempt_history)
    }
}
