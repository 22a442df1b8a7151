use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{QuizData, QuizKey, QuizSettings};
use quiz_core::time::fixed_now;
use services::{AttemptHistoryService, Clock, QuizLoopService, quiz_from_str};
use storage::repository::Storage;

use crate::context::{LastResult, UiApp, build_app_context};
use crate::views::{QuizView, ResultsView};

pub const HARNESS_QUIZ: &str = r#"{
    "title": "Harness Quiz",
    "timeLimit": 90,
    "questions": [
        {"id": 1, "question": "Largest planet?", "options": [{"key": "A", "text": "Jupiter"}, {"key": "B", "text": "Mars"}], "correctAnswer": "A", "explanation": "Jupiter is a gas giant."},
        {"id": 2, "question": "Closest star?", "options": [{"key": "A", "text": "Sirius"}, {"key": "B", "text": "The Sun"}], "correctAnswer": "B"}
    ]
}"#;

#[derive(Clone)]
struct TestApp {
    quiz_key: QuizKey,
    quiz: Arc<QuizData>,
    quiz_loop: Arc<QuizLoopService>,
    attempt_history: Arc<AttemptHistoryService>,
}

impl UiApp for TestApp {
    fn quiz_key(&self) -> QuizKey {
        self.quiz_key.clone()
    }

    fn quiz(&self) -> Arc<QuizData> {
        Arc::clone(&self.quiz)
    }

    fn settings(&self) -> QuizSettings {
        QuizSettings::default()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.attempt_history)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    last_result: LastResult,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| Signal::new(props.last_result.clone()));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub quiz_key: QuizKey,
    pub quiz: Arc<QuizData>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html contains `needle`.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn harness_quiz() -> QuizData {
    quiz_from_str(HARNESS_QUIZ).expect("harness quiz is valid")
}

/// Must be called from within a tokio runtime.
pub fn setup_view_harness(view: ViewKind, last_result: LastResult) -> ViewHarness {
    setup_view_harness_with_storage(view, last_result, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    last_result: LastResult,
    storage: Storage,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let quiz_key = QuizKey::new("harness").expect("non-empty key");
    let quiz = Arc::new(harness_quiz());
    let quiz_loop = Arc::new(QuizLoopService::new(
        clock,
        Arc::clone(&storage.snapshots),
        Arc::clone(&storage.attempts),
    ));
    let attempt_history = Arc::new(AttemptHistoryService::new(
        clock,
        Arc::clone(&storage.attempts),
    ));

    let app = Arc::new(TestApp {
        quiz_key: quiz_key.clone(),
        quiz: Arc::clone(&quiz),
        quiz_loop,
        attempt_history,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            last_result,
        },
    );

    ViewHarness {
        dom,
        storage,
        quiz_key,
        quiz,
    }
}
