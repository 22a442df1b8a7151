use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{ProgressSnapshot, QuizKey};
use storage::repository::SnapshotRepository;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Timer snapshots are written when remaining time is a multiple of this.
pub const SNAPSHOT_CADENCE_SECS: u32 = 5;

#[must_use]
pub fn is_snapshot_tick(remaining_secs: u32) -> bool {
    remaining_secs % SNAPSHOT_CADENCE_SECS == 0
}

/// Receives progress snapshots from a session.
///
/// Implementations must return immediately; delivery is fire-and-forget and
/// failures are never reported back to the session.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, key: &QuizKey, snapshot: &ProgressSnapshot);

    /// Drop any saved progress for `key`, ordered after earlier reports.
    fn discard(&self, key: &QuizKey);
}

/// Reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _key: &QuizKey, _snapshot: &ProgressSnapshot) {}

    fn discard(&self, _key: &QuizKey) {}
}

enum WriterCommand {
    Save(QuizKey, ProgressSnapshot),
    Clear(QuizKey),
    Flush(oneshot::Sender<()>),
}

/// Forwards snapshots to a `SnapshotRepository` from a background task.
///
/// Commands are applied in the order they were sent, so a discard issued after
/// the last report always wins.
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SnapshotWriter {
    /// Spawn the writer task. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(clock: Clock, snapshots: Arc<dyn SnapshotRepository>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriterCommand>();
        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    WriterCommand::Save(key, snapshot) => {
                        if let Err(err) = snapshots.save_snapshot(&key, &snapshot, clock.now()).await
                        {
                            warn!(quiz = %key, error = %err, "failed to save progress snapshot");
                        }
                    }
                    WriterCommand::Clear(key) => {
                        if let Err(err) = snapshots.clear_snapshot(&key).await {
                            warn!(quiz = %key, error = %err, "failed to clear progress snapshot");
                        }
                    }
                    WriterCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("snapshot writer stopped");
        });
        Self { tx }
    }

    /// Wait until every command sent before this call has been applied.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(WriterCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

impl ProgressReporter for SnapshotWriter {
    fn report(&self, key: &QuizKey, snapshot: &ProgressSnapshot) {
        debug!(
            quiz = %key,
            answered = snapshot.answers.len(),
            remaining_secs = snapshot.remaining_secs,
            "progress snapshot"
        );
        if self
            .tx
            .send(WriterCommand::Save(key.clone(), snapshot.clone()))
            .is_err()
        {
            warn!(quiz = %key, "snapshot writer is gone; dropping snapshot");
        }
    }

    fn discard(&self, key: &QuizKey) {
        if self.tx.send(WriterCommand::Clear(key.clone())).is_err() {
            warn!(quiz = %key, "snapshot writer is gone; dropping clear");
        }
    }
}
