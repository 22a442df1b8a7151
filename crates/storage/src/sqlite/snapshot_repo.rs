use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{ProgressSnapshot, QuizKey};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{answers_from_json, answers_to_json, conn, ser, u32_from_i64};
use crate::repository::{SnapshotRepository, StorageError, StoredSnapshot};

#[async_trait]
impl SnapshotRepository for SqliteRepository {
    async fn save_snapshot(
        &self,
        key: &QuizKey,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let answers = answers_to_json(&snapshot.answers)?;

        sqlx::query(
            r"
                INSERT INTO progress_snapshots (quiz_key, answers, remaining_secs, saved_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(quiz_key) DO UPDATE SET
                    answers = excluded.answers,
                    remaining_secs = excluded.remaining_secs,
                    saved_at = excluded.saved_at
            ",
        )
        .bind(key.as_str())
        .bind(answers)
        .bind(i64::from(snapshot.remaining_secs))
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn load_snapshot(&self, key: &QuizKey) -> Result<Option<StoredSnapshot>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT answers, remaining_secs, saved_at
                FROM progress_snapshots
                WHERE quiz_key = ?1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let answers = answers_from_json(&row.try_get::<String, _>("answers").map_err(ser)?)?;
        let remaining_secs = u32_from_i64(
            "remaining_secs",
            row.try_get::<i64, _>("remaining_secs").map_err(ser)?,
        )?;
        let saved_at = row.try_get("saved_at").map_err(ser)?;

        Ok(Some(StoredSnapshot {
            snapshot: ProgressSnapshot::new(answers, remaining_secs),
            saved_at,
        }))
    }

    async fn clear_snapshot(&self, key: &QuizKey) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress_snapshots WHERE quiz_key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
