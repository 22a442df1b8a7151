use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use super::service::SessionEvent;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle to a running tick source.
///
/// The underlying task is aborted on [`TimerHandle::cancel`] and on drop, so
/// no tick can reach a session after the handle is gone.
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// A handle with nothing behind it; useful when a session runs untimed.
    #[must_use]
    pub fn inactive() -> Self {
        Self { task: None }
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("quiz timer cancelled");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Periodic tick source feeding [`SessionEvent::Tick`] into a session queue.
pub struct TimerDriver;

impl TimerDriver {
    /// Start ticking once per second. Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(events: mpsc::UnboundedSender<SessionEvent>) -> TimerHandle {
        Self::start_with_period(events, TICK_PERIOD)
    }

    /// Start ticking every `period`; the first tick fires one period from now.
    #[must_use]
    pub fn start_with_period(
        events: mpsc::UnboundedSender<SessionEvent>,
        period: Duration,
    ) -> TimerHandle {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(SessionEvent::Tick).is_err() {
                    break;
                }
            }
        });
        TimerHandle { task: Some(task) }
    }
}
