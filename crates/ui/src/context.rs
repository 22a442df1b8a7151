use std::sync::Arc;

use quiz_core::model::{QuizData, QuizKey, QuizSettings};
use services::{AttemptHistoryService, QuizLoopService};

use crate::vm::ResultsVm;

pub trait UiApp: Send + Sync {
    fn quiz_key(&self) -> QuizKey;
    fn quiz(&self) -> Arc<QuizData>;
    fn settings(&self) -> QuizSettings;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn attempt_history(&self) -> Arc<AttemptHistoryService>;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_key: QuizKey,
    quiz: Arc<QuizData>,
    settings: QuizSettings,

    quiz_loop: Arc<QuizLoopService>,
    attempt_history: Arc<AttemptHistoryService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_key: app.quiz_key(),
            quiz: app.quiz(),
            settings: app.settings(),
            quiz_loop: app.quiz_loop(),
            attempt_history: app.attempt_history(),
        }
    }

    #[must_use]
    pub fn quiz_key(&self) -> QuizKey {
        self.quiz_key.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizData> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings.clone()
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.attempt_history)
    }
}

/// Result of the most recent session, handed from the quiz view to the results view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LastResult(pub Option<ResultsVm>);

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
