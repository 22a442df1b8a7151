mod keys;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::OptionKey;
use services::sessions::{NavigationController, SessionState};
use services::{InputEvent, SessionEvent, TimerDriver};
use tokio::sync::mpsc;
use tracing::warn;

use crate::context::{AppContext, LastResult};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{QuizVm, ResultsVm};
use keys::nav_key;

type EventSender = mpsc::UnboundedSender<SessionEvent>;

fn send(events: Signal<Option<EventSender>>, event: SessionEvent) {
    if let Some(tx) = events.read().as_ref() {
        let _ = tx.send(event);
    }
}

fn index_class(current: bool, answered: bool) -> &'static str {
    match (current, answered) {
        (true, _) => "quiz-index__item quiz-index__item--current",
        (false, true) => "quiz-index__item quiz-index__item--answered",
        (false, false) => "quiz-index__item",
    }
}

fn option_class(selected: bool) -> &'static str {
    if selected {
        "quiz-option quiz-option--selected"
    } else {
        "quiz-option"
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let last_result = use_context::<Signal<LastResult>>();

    let vm = use_signal(|| None::<QuizVm>);
    let mirror = use_signal(|| None::<SessionState>);
    let events = use_signal(|| None::<EventSender>);
    let error = use_signal(|| None::<ViewError>);

    // The session, its queue and its timer live in this future; unmounting
    // the view drops all three.
    use_future(move || {
        let ctx = ctx.clone();
        let mut vm = vm;
        let mut mirror = mirror;
        let mut events = events;
        let mut error = error;
        let mut last_result = last_result;

        async move {
            let quiz_loop = ctx.quiz_loop();
            let quiz = ctx.quiz();
            let settings = ctx.settings();
            let mut session = match quiz_loop.start_session(ctx.quiz_key(), &quiz, &settings).await
            {
                Ok(session) => session,
                Err(err) => {
                    warn!(error = %err, "could not start quiz session");
                    error.set(Some(ViewError::SessionUnavailable));
                    return;
                }
            };

            let (tx, mut rx) = mpsc::unbounded_channel();
            events.set(Some(tx.clone()));
            let timer = TimerDriver::start(tx);
            let submission = session
                .run_observed(&mut rx, timer, |session| {
                    vm.set(Some(QuizVm::from_session(session)));
                    mirror.set(Some(session.state().clone()));
                })
                .await;
            events.set(None);

            let Some(submission) = submission else {
                return;
            };
            let attempt_id = match quiz_loop.finish(&mut session).await {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(error = %err, "could not save attempt");
                    None
                }
            };
            last_result.set(LastResult(Some(ResultsVm::new(
                session.quiz(),
                &submission,
                attempt_id,
            ))));
            let _ = navigator.push(Route::Results {});
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let key = nav_key(&evt.data.key(), evt.data.modifiers());
        let input = InputEvent::key(key);
        let suppress = mirror
            .read()
            .as_ref()
            .is_some_and(|state| NavigationController::resolve(state, input).prevent_default);
        if suppress {
            evt.prevent_default();
        }
        send(events, SessionEvent::Input(input));
    });

    let vm_guard = vm.read();
    let body = match (vm_guard.as_ref(), *error.read()) {
        (_, Some(err)) => rsx! {
            p { class: "quiz-error", "{err.message()}" }
        },
        (None, None) => rsx! {
            p { "Loading..." }
        },
        (Some(vm), None) => {
            let position = vm.position;
            let question = vm.question.id;
            let timer_class = if vm.low_time { "quiz-timer quiz-timer--low" } else { "quiz-timer" };
            let submit_note = match vm.unanswered() {
                0 => String::new(),
                1 => "1 question unanswered".to_string(),
                n => format!("{n} questions unanswered"),
            };
            rsx! {
                header { class: "quiz-header",
                    h2 { class: "quiz-title", "{vm.title}" }
                    span { class: "{timer_class}", id: "quiz-timer", "{vm.remaining_label}" }
                }
                nav { class: "quiz-index", aria_label: "Questions",
                    for item in vm.index.iter().cloned() {
                        button {
                            key: "{item.index}",
                            r#type: "button",
                            class: index_class(item.current, item.answered),
                            onclick: move |_| send(events, SessionEvent::Input(InputEvent::Jump(item.index))),
                            "{item.label}"
                        }
                    }
                }
                section { class: "quiz-question",
                    p { class: "quiz-question__number", "Question {vm.question.number} of {vm.total}" }
                    h3 { class: "quiz-question__text", "{vm.question.text}" }
                    ul { class: "quiz-options",
                        for option in vm.question.options.iter().cloned() {
                            li { key: "{option.key}",
                                button {
                                    r#type: "button",
                                    class: option_class(option.selected),
                                    aria_pressed: "{option.selected}",
                                    onclick: move |_| {
                                        let Some(key) = OptionKey::from_char(option.key) else {
                                            return;
                                        };
                                        send(events, SessionEvent::Input(InputEvent::Choose { question, key }));
                                    },
                                    span { class: "quiz-option__key", "{option.key}" }
                                    span { class: "quiz-option__text", "{option.text}" }
                                }
                            }
                        }
                    }
                }
                footer { class: "quiz-footer",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: vm.is_first,
                        onclick: move |_| send(events, SessionEvent::Input(InputEvent::Jump(position.saturating_sub(1)))),
                        "Previous"
                    }
                    span { class: "quiz-progress", "{vm.progress_label()}" }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: vm.is_last,
                        onclick: move |_| send(events, SessionEvent::Input(InputEvent::Jump(position + 1))),
                        "Next"
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-primary",
                        id: "quiz-submit",
                        onclick: move |_| send(events, SessionEvent::Submit),
                        "Submit"
                    }
                    if !submit_note.is_empty() {
                        p { class: "quiz-footer__note", "{submit_note}" }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page quiz-page",
            id: "quiz-root",
            tabindex: "0",
            onkeydown: on_key,
            onmounted: move |evt| async move {
                let _ = evt.set_focus(true).await;
            },
            {body}
        }
    }
}
