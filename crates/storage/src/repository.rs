use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{AttemptRecord, ProgressSnapshot, QuizKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A snapshot as stored, with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub snapshot: ProgressSnapshot,
    pub saved_at: DateTime<Utc>,
}

/// Persistence collaborator for in-progress sessions.
///
/// One snapshot per quiz key; a save replaces the previous one.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Persist the latest snapshot for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_snapshot(
        &self,
        key: &QuizKey,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Fetch the snapshot for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection or decoding failures.
    async fn load_snapshot(&self, key: &QuizKey) -> Result<Option<StoredSnapshot>, StorageError>;

    /// Remove the snapshot for `key`. Missing snapshots are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection failures.
    async fn clear_snapshot(&self, key: &QuizKey) -> Result<(), StorageError>;
}

/// Attempt plus its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRow {
    pub id: i64,
    pub attempt: AttemptRecord,
}

impl AttemptRow {
    #[must_use]
    pub fn new(id: i64, attempt: AttemptRecord) -> Self {
        Self { id, attempt }
    }
}

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append a finished attempt and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_attempt(&self, attempt: &AttemptRecord) -> Result<i64, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_attempt(&self, id: i64) -> Result<AttemptRecord, StorageError>;

    /// Most recent attempts for a quiz, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection or decoding failures.
    async fn list_attempts(&self, key: &QuizKey, limit: u32)
    -> Result<Vec<AttemptRow>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    snapshots: Arc<Mutex<HashMap<QuizKey, StoredSnapshot>>>,
    attempts: Arc<Mutex<Vec<AttemptRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn save_snapshot(
        &self,
        key: &QuizKey,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            key.clone(),
            StoredSnapshot {
                snapshot: snapshot.clone(),
                saved_at,
            },
        );
        Ok(())
    }

    async fn load_snapshot(&self, key: &QuizKey) -> Result<Option<StoredSnapshot>, StorageError> {
        let guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn clear_snapshot(&self, key: &QuizKey) -> Result<(), StorageError> {
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(&self, attempt: &AttemptRecord) -> Result<i64, StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("attempt id overflow".into()))?
            + 1;
        guard.push(AttemptRow::new(id, attempt.clone()));
        Ok(id)
    }

    async fn get_attempt(&self, id: i64) -> Result<AttemptRecord, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.attempt.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn list_attempts(
        &self,
        key: &QuizKey,
        limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut rows: Vec<AttemptRow> = guard
            .iter()
            .filter(|row| row.attempt.quiz_key() == key)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.attempt
                .completed_at()
                .cmp(&a.attempt.completed_at())
                .then(b.id.cmp(&a.id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub snapshots: Arc<dyn SnapshotRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            snapshots,
            attempts,
        }
    }
}
