mod navigation;
mod plan;
mod progress;
mod service;
mod state;
mod timer;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use navigation::{
    FocusTarget, InputEvent, NavAction, NavKey, NavigationController, Resolution,
    answer_key_for_char,
};
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::{
    NoopReporter, ProgressReporter, SNAPSHOT_CADENCE_SECS, SnapshotWriter, is_snapshot_tick,
};
pub use service::{InputOutcome, QuizSession, SessionEvent, Submission};
pub use state::{SessionProgress, SessionState, TickOutcome};
pub use timer::{TICK_PERIOD, TimerDriver, TimerHandle};
pub use view::{AttemptHistoryService, AttemptId, AttemptListItem};
pub use workflow::QuizLoopService;
