use quiz_core::model::QuestionId;
use services::QuizSession;

use crate::vm::time_fmt::format_clock;

/// Seconds left at which the timer is shown as urgent.
const LOW_TIME_SECS: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexItemVm {
    pub index: usize,
    pub label: String,
    pub answered: bool,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

/// Render-ready state of a running quiz session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub title: String,
    pub question: QuestionVm,
    pub index: Vec<IndexItemVm>,
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub remaining_secs: u32,
    pub remaining_label: String,
    pub low_time: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub submitted: bool,
}

impl QuizVm {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let state = session.state();
        let current = state.current_question();
        let selected = state.answer_for(current.id());
        let progress = state.progress();

        let question = QuestionVm {
            id: current.id(),
            number: state.position() + 1,
            text: current.text().to_owned(),
            options: current
                .options()
                .iter()
                .map(|option| OptionVm {
                    key: option.key().as_char(),
                    text: option.text().to_owned(),
                    selected: selected == Some(option.key()),
                })
                .collect(),
        };

        let index = state
            .quiz()
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| IndexItemVm {
                index,
                label: (index + 1).to_string(),
                answered: state.answers().contains(question.id()),
                current: index == state.position(),
            })
            .collect();

        let remaining_secs = state.remaining_secs();
        Self {
            title: state.quiz().title().to_owned(),
            question,
            index,
            position: state.position(),
            total: progress.total,
            answered: progress.answered,
            remaining_secs,
            remaining_label: format_clock(remaining_secs),
            low_time: remaining_secs <= LOW_TIME_SECS,
            is_first: state.position() == 0,
            is_last: state.position() + 1 == progress.total,
            submitted: session.is_submitted(),
        }
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} / {} answered", self.answered, self.total)
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }
}
