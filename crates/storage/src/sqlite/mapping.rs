use quiz_core::model::{AttemptRecord, QuizKey, UserAnswers};
use sqlx::Row;

use crate::repository::{AttemptRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn quiz_key_from_str(raw: String) -> Result<QuizKey, StorageError> {
    QuizKey::new(raw).ok_or_else(|| StorageError::Serialization("blank quiz_key".into()))
}

pub(crate) fn answers_to_json(answers: &UserAnswers) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}

pub(crate) fn answers_from_json(raw: &str) -> Result<UserAnswers, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<AttemptRecord, StorageError> {
    let quiz_key = quiz_key_from_str(row.try_get("quiz_key").map_err(ser)?)?;
    let title: String = row.try_get("title").map_err(ser)?;
    let started_at = row.try_get("started_at").map_err(ser)?;
    let completed_at = row.try_get("completed_at").map_err(ser)?;
    let elapsed_secs = u32_from_i64(
        "elapsed_secs",
        row.try_get::<i64, _>("elapsed_secs").map_err(ser)?,
    )?;
    let correct = u32_from_i64("correct", row.try_get::<i64, _>("correct").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    let timed_out = row.try_get::<i64, _>("timed_out").map_err(ser)? != 0;
    let answers = answers_from_json(&row.try_get::<String, _>("answers").map_err(ser)?)?;

    AttemptRecord::from_persisted(
        quiz_key,
        title,
        started_at,
        completed_at,
        elapsed_secs,
        correct,
        total,
        timed_out,
        answers,
    )
    .map_err(ser)
}

pub(crate) fn map_attempt_row_with_id(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<AttemptRow, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let attempt = map_attempt_row(row)?;
    Ok(AttemptRow::new(id, attempt))
}
