use async_trait::async_trait;
use quiz_core::model::{AttemptRecord, QuizKey};

use super::SqliteRepository;
use super::mapping::{answers_to_json, conn, map_attempt_row, map_attempt_row_with_id};
use crate::repository::{AttemptRepository, AttemptRow, StorageError};

#[async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempt(&self, attempt: &AttemptRecord) -> Result<i64, StorageError> {
        let answers = answers_to_json(attempt.answers())?;

        let res = sqlx::query(
            r"
                INSERT INTO attempts (
                    quiz_key, title, started_at, completed_at,
                    elapsed_secs, correct, total, timed_out, answers
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(attempt.quiz_key().as_str())
        .bind(attempt.title())
        .bind(attempt.started_at())
        .bind(attempt.completed_at())
        .bind(i64::from(attempt.elapsed_secs()))
        .bind(i64::from(attempt.correct()))
        .bind(i64::from(attempt.total()))
        .bind(i64::from(attempt.timed_out()))
        .bind(answers)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(res.last_insert_rowid())
    }

    async fn get_attempt(&self, id: i64) -> Result<AttemptRecord, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    quiz_key, title, started_at, completed_at,
                    elapsed_secs, correct, total, timed_out, answers
                FROM attempts
                WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_attempt_row(&row)
    }

    async fn list_attempts(
        &self,
        key: &QuizKey,
        limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, quiz_key, title, started_at, completed_at,
                    elapsed_secs, correct, total, timed_out, answers
                FROM attempts
                WHERE quiz_key = ?1
                ORDER BY completed_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(key.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_attempt_row_with_id).collect()
    }
}
