use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{
    OptionKey, ProgressSnapshot, QuestionId, QuizData, QuizKey, SessionId, UserAnswers,
};
use quiz_core::{ScoreReport, score};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::navigation::{InputEvent, NavAction, NavigationController};
use super::progress::{ProgressReporter, is_snapshot_tick};
use super::state::{SessionProgress, SessionState, TickOutcome};
use super::timer::TimerHandle;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Everything that can happen to a running session, delivered through one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Tick,
    Input(InputEvent),
    Submit,
}

/// Effect of applying an input to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub prevent_default: bool,
    pub position_changed: bool,
    pub answer_changed: bool,
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// What a session hands to the results side when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub session_id: SessionId,
    pub answers: UserAnswers,
    pub elapsed_secs: u32,
    pub report: ScoreReport,
    pub timed_out: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt from start to submission.
///
/// Wraps [`SessionState`] with progress reporting, input handling and a
/// submission guard: the first submission wins and later ones return `None`.
pub struct QuizSession {
    id: SessionId,
    key: QuizKey,
    state: SessionState,
    started_at: DateTime<Utc>,
    resumed: bool,
    running: bool,
    progress: Arc<dyn ProgressReporter>,
    submission: Option<Submission>,
    attempt_id: Option<i64>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("position", &self.state.position())
            .field("remaining_secs", &self.state.remaining_secs())
            .field("submitted", &self.submission.is_some())
            .finish_non_exhaustive()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new(
        key: QuizKey,
        quiz: Arc<QuizData>,
        allocated_secs: u32,
        started_at: DateTime<Utc>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self::from_state(
            key,
            SessionState::new(quiz, allocated_secs),
            started_at,
            false,
            progress,
        )
    }

    #[must_use]
    pub fn resume(
        key: QuizKey,
        quiz: Arc<QuizData>,
        allocated_secs: u32,
        snapshot: &ProgressSnapshot,
        started_at: DateTime<Utc>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self::from_state(
            key,
            SessionState::resume(quiz, allocated_secs, snapshot),
            started_at,
            true,
            progress,
        )
    }

    fn from_state(
        key: QuizKey,
        state: SessionState,
        started_at: DateTime<Utc>,
        resumed: bool,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        let id = SessionId::generate();
        info!(
            session = %id,
            quiz = %key,
            questions = state.quiz().len(),
            remaining_secs = state.remaining_secs(),
            answered = state.answers().len(),
            resumed,
            "quiz session created"
        );
        Self {
            id,
            key,
            state,
            started_at,
            resumed,
            running: false,
            progress,
            submission: None,
            attempt_id: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn key(&self) -> &QuizKey {
        &self.key
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizData {
        self.state.quiz()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.state.progress()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    #[must_use]
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    #[must_use]
    pub fn attempt_id(&self) -> Option<i64> {
        self.attempt_id
    }

    pub(crate) fn set_attempt_id(&mut self, id: i64) {
        self.attempt_id = Some(id);
    }

    /// Mark the countdown as started.
    ///
    /// Emits the opening snapshot when the starting time sits on the
    /// five-second cadence. Calling it again has no effect.
    pub fn begin(&mut self) {
        if self.running || self.is_submitted() {
            return;
        }
        self.running = true;
        if is_snapshot_tick(self.state.remaining_secs()) {
            self.report();
        }
    }

    pub fn select_answer(&mut self, id: QuestionId, key: OptionKey) -> bool {
        let changed = self.state.select_answer(id, key);
        if changed {
            debug!(session = %self.id, question = %id, key = %key, "answer selected");
            self.report();
        }
        changed
    }

    pub fn set_position(&mut self, index: usize) -> usize {
        self.state.set_position(index)
    }

    /// Route a key press or index click through the navigation controller.
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let resolution = NavigationController::resolve(&self.state, event);
        let mut outcome = InputOutcome {
            prevent_default: resolution.prevent_default,
            ..InputOutcome::default()
        };
        match resolution.action {
            Some(NavAction::SetPosition(index)) => {
                let before = self.state.position();
                outcome.position_changed = self.set_position(index) != before;
            }
            Some(NavAction::SelectAnswer(id, key)) => {
                outcome.answer_changed = self.select_answer(id, key);
            }
            None => {}
        }
        outcome
    }

    /// Advance the countdown by one second.
    ///
    /// Reports a snapshot on the five-second cadence and submits on expiry;
    /// the expiry submission is returned.
    pub fn tick(&mut self) -> Option<Submission> {
        match self.state.tick() {
            TickOutcome::Ticked { remaining_secs } => {
                if is_snapshot_tick(remaining_secs) {
                    self.report();
                }
                None
            }
            TickOutcome::Expired => {
                self.report();
                info!(session = %self.id, "time expired");
                self.finalize(true)
            }
            TickOutcome::Idle => None,
        }
    }

    /// Submit the session. Only the first call yields a `Submission`.
    pub fn submit(&mut self) -> Option<Submission> {
        self.finalize(false)
    }

    /// Apply one queued event; returns the submission if this event ended the session.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Submission> {
        match event {
            SessionEvent::Tick => self.tick(),
            SessionEvent::Input(input) => {
                self.handle_input(input);
                None
            }
            SessionEvent::Submit => self.submit(),
        }
    }

    /// Process events in arrival order until the session is submitted.
    ///
    /// `timer` is released on every exit path: submission, expiry, the queue
    /// closing, or the returned future being dropped.
    pub async fn run(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<SessionEvent>,
        timer: TimerHandle,
    ) -> Option<Submission> {
        self.run_observed(events, timer, |_| {}).await
    }

    /// Like [`QuizSession::run`], calling `observe` once after start and after
    /// every applied event.
    pub async fn run_observed<F>(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<SessionEvent>,
        mut timer: TimerHandle,
        mut observe: F,
    ) -> Option<Submission>
    where
        F: FnMut(&QuizSession),
    {
        self.begin();
        observe(self);
        while let Some(event) = events.recv().await {
            let submission = self.apply(event);
            observe(self);
            if submission.is_some() {
                timer.cancel();
                return submission;
            }
            if self.is_submitted() {
                break;
            }
        }
        timer.cancel();
        None
    }

    fn report(&self) {
        self.progress.report(&self.key, &self.state.snapshot());
    }

    fn finalize(&mut self, timed_out: bool) -> Option<Submission> {
        if self.submission.is_some() {
            return None;
        }
        self.state.freeze();
        self.running = false;

        let answers = self.state.answers().clone();
        let report = score(self.state.quiz(), &answers);
        let submission = Submission {
            session_id: self.id,
            answers,
            elapsed_secs: self.state.elapsed_secs(),
            report,
            timed_out,
        };
        info!(
            session = %self.id,
            correct = submission.report.correct,
            total = submission.report.total,
            elapsed_secs = submission.elapsed_secs,
            timed_out,
            "quiz submitted"
        );
        self.submission = Some(submission.clone());
        Some(submission)
    }
}
