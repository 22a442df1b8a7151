use std::sync::Arc;

use quiz_core::model::{AttemptRecord, QuizData, QuizKey, QuizSettings};
use storage::repository::{AttemptRepository, SnapshotRepository};
use tracing::{info, warn};

use super::plan::SessionBuilder;
use super::progress::{ProgressReporter, SnapshotWriter};
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Orchestrates session start, resume and persisted completion.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    snapshots: Arc<dyn SnapshotRepository>,
    attempts: Arc<dyn AttemptRepository>,
    progress: SnapshotWriter,
}

impl QuizLoopService {
    /// Build the service and spawn its snapshot writer.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(
        clock: Clock,
        snapshots: Arc<dyn SnapshotRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        let progress = SnapshotWriter::spawn(clock, Arc::clone(&snapshots));
        Self {
            clock,
            snapshots,
            attempts,
            progress,
        }
    }

    /// Start a session for `quiz`, resuming saved progress for `key` if any.
    ///
    /// A snapshot that cannot be read is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` if applying `settings` leaves an invalid quiz.
    pub async fn start_session(
        &self,
        key: QuizKey,
        quiz: &QuizData,
        settings: &QuizSettings,
    ) -> Result<QuizSession, SessionError> {
        let plan = SessionBuilder::new(quiz, settings).build()?;
        let started_at = self.clock.now();
        let reporter: Arc<dyn ProgressReporter> = Arc::new(self.progress.clone());

        let saved = match self.snapshots.load_snapshot(&key).await {
            Ok(saved) => saved,
            Err(err) => {
                warn!(quiz = %key, error = %err, "could not read saved progress; starting fresh");
                None
            }
        };

        let session = match saved {
            Some(stored) => {
                info!(quiz = %key, saved_at = %stored.saved_at, "resuming saved progress");
                QuizSession::resume(
                    key,
                    plan.quiz,
                    plan.allocated_secs,
                    &stored.snapshot,
                    started_at,
                    reporter,
                )
            }
            None => QuizSession::new(key, plan.quiz, plan.allocated_secs, started_at, reporter),
        };
        Ok(session)
    }

    /// Persist the attempt for a submitted session and drop its saved progress.
    ///
    /// Calling it again for the same session returns the stored id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitted` before submission, or
    /// `SessionError::Storage` if the attempt cannot be written.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<i64, SessionError> {
        if let Some(id) = session.attempt_id() {
            return Ok(id);
        }
        let submission = session.submission().ok_or(SessionError::NotSubmitted)?;

        let completed_at = self.clock.now().max(session.started_at());
        let record = AttemptRecord::from_persisted(
            session.key().clone(),
            session.quiz().title().to_owned(),
            session.started_at(),
            completed_at,
            submission.elapsed_secs,
            u32::try_from(submission.report.correct).unwrap_or(u32::MAX),
            u32::try_from(submission.report.total).unwrap_or(u32::MAX),
            submission.timed_out,
            submission.answers.clone(),
        )?;

        let id = self.attempts.append_attempt(&record).await?;
        session.set_attempt_id(id);
        info!(quiz = %session.key(), attempt = id, "attempt saved");

        self.progress.discard(session.key());
        self.progress.flush().await;
        Ok(id)
    }

    /// Drop saved progress for `key` without recording an attempt.
    pub async fn abandon(&self, key: &QuizKey) {
        info!(quiz = %key, "progress abandoned");
        self.progress.discard(key);
        self.progress.flush().await;
    }

    /// Wait for queued snapshot writes to reach storage.
    pub async fn flush_progress(&self) {
        self.progress.flush().await;
    }
}
