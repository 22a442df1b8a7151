use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, LastResult};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, map_attempt_rows};

const HISTORY_LIMIT: u32 = 10;

fn feedback_class(is_correct: bool) -> &'static str {
    if is_correct {
        "feedback feedback--correct"
    } else {
        "feedback feedback--wrong"
    }
}

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let last_result = use_context::<Signal<LastResult>>();

    let history = use_resource(move || {
        let attempt_history = ctx.attempt_history();
        let key = ctx.quiz_key();
        async move {
            let items = attempt_history
                .list_recent(&key, HISTORY_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_attempt_rows(&items))
        }
    });
    let history_state = view_state_from_resource(history);

    let result_guard = last_result.read();
    let summary = match result_guard.0.as_ref() {
        None => rsx! {
            p { "No results yet." }
        },
        Some(vm) => rsx! {
            section { class: "results-summary",
                h2 { class: "results-title", "{vm.title}" }
                p { class: "results-score", "{vm.score_label()}" }
                p { class: "results-time", "Time used: {vm.elapsed_label}" }
                if vm.timed_out {
                    p { class: "results-note", "Time ran out; unanswered questions count as incorrect." }
                }
                if !vm.saved() {
                    p { class: "results-note", "This attempt could not be saved." }
                }
            }
            ol { class: "results-feedback",
                for item in vm.items.iter() {
                    li {
                        key: "{item.number}",
                        class: feedback_class(item.is_correct),
                        p { class: "feedback__question", "{item.number}. {item.question}" }
                        match item.chosen.as_deref() {
                            Some(chosen) => rsx! { p { class: "feedback__chosen", "Your answer: {chosen}" } },
                            None => rsx! { p { class: "feedback__chosen", "Not answered" } },
                        }
                        if !item.is_correct {
                            p { class: "feedback__correct", "Correct answer: {item.correct}" }
                        }
                        if let Some(explanation) = item.explanation.as_deref() {
                            p { class: "feedback__explanation", "{explanation}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "page results-page",
            {summary}
            button {
                class: "btn btn-primary",
                id: "results-retake",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Quiz {});
                },
                "Retake quiz"
            }
            section { class: "results-history",
                h3 { "Recent attempts" }
                match history_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                    },
                    ViewState::Ready(rows) => rsx! {
                        AttemptList { rows }
                    },
                }
            }
        }
    }
}

#[component]
fn AttemptList(rows: Vec<AttemptRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { "No attempts recorded yet." }
        };
    }
    rsx! {
        ul { class: "attempt-list",
            for row in rows {
                li { key: "{row.id}", class: "attempt-list__item",
                    span { class: "attempt-list__when", "{row.completed_at_str}" }
                    span { class: "attempt-list__score", "{row.score_label}" }
                    span { class: "attempt-list__time", "{row.elapsed_label}" }
                    if row.timed_out {
                        span { class: "attempt-list__flag", "timed out" }
                    }
                }
            }
        }
    }
}
