use quiz_core::model::{OptionKey, QuestionId};

use super::state::SessionState;

/// Keys the quiz player reacts to; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Enter,
    Char(char),
    Other,
}

/// Where keyboard focus was when the key event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Document,
    TextInput,
}

/// Discrete user input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: NavKey, focus: FocusTarget },
    /// Pointer activation of a question in the index strip.
    Jump(usize),
    /// Pointer activation of an answer option.
    Choose { question: QuestionId, key: OptionKey },
}

impl InputEvent {
    #[must_use]
    pub fn key(key: NavKey) -> Self {
        Self::Key {
            key,
            focus: FocusTarget::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    SetPosition(usize),
    SelectAnswer(QuestionId, OptionKey),
}

/// What an input resolved to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub action: Option<NavAction>,
    /// The triggering event's default activation must be suppressed.
    pub prevent_default: bool,
}

/// Map a digit `1`-`4` or a letter `a`-`d` (any case) to an option key.
#[must_use]
pub fn answer_key_for_char(c: char) -> Option<OptionKey> {
    match c.to_ascii_uppercase() {
        '1' | 'A' => Some(OptionKey::A),
        '2' | 'B' => Some(OptionKey::B),
        '3' | 'C' => Some(OptionKey::C),
        '4' | 'D' => Some(OptionKey::D),
        _ => None,
    }
}

/// Stateless mapping from input events to session operations.
pub struct NavigationController;

impl NavigationController {
    #[must_use]
    pub fn resolve(state: &SessionState, event: InputEvent) -> Resolution {
        let current = state.position();
        match event {
            InputEvent::Jump(index) => Resolution {
                action: Some(NavAction::SetPosition(index)),
                prevent_default: false,
            },
            InputEvent::Choose { question, key } => Resolution {
                action: Some(NavAction::SelectAnswer(question, key)),
                prevent_default: false,
            },
            InputEvent::Key {
                focus: FocusTarget::TextInput,
                ..
            } => Resolution::default(),
            InputEvent::Key { key, .. } => match key {
                NavKey::ArrowLeft => Resolution {
                    action: Some(NavAction::SetPosition(current.saturating_sub(1))),
                    prevent_default: false,
                },
                NavKey::ArrowRight | NavKey::Enter => Resolution {
                    action: Some(NavAction::SetPosition(current.saturating_add(1))),
                    prevent_default: true,
                },
                NavKey::Char(c) => {
                    let question = state.current_question();
                    let action = answer_key_for_char(c)
                        .filter(|key| question.has_option(*key))
                        .map(|key| NavAction::SelectAnswer(question.id(), key));
                    Resolution {
                        action,
                        prevent_default: false,
                    }
                }
                NavKey::Other => Resolution::default(),
            },
        }
    }
}
