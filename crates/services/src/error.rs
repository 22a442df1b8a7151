//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AttemptError, QuizError, QuizSettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session has not been submitted")]
    NotSubmitted,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading a quiz document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoadError {
    #[error("failed to read quiz file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed quiz document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `AttemptHistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
