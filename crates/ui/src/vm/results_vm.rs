use quiz_core::model::{OptionKey, Question, QuizData};
use services::{AttemptId, AttemptListItem, Submission};

use crate::vm::time_fmt::{format_clock, format_datetime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub number: usize,
    pub question: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Score and per-question feedback for a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: String,
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub elapsed_label: String,
    pub timed_out: bool,
    pub items: Vec<FeedbackVm>,
    pub attempt_id: Option<AttemptId>,
}

impl ResultsVm {
    /// `quiz` must be the quiz the session ran over (after shuffle/limit).
    #[must_use]
    pub fn new(quiz: &QuizData, submission: &Submission, attempt_id: Option<AttemptId>) -> Self {
        let items = submission
            .report
            .outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| {
                let question = quiz.question_by_id(outcome.question_id)?;
                Some(FeedbackVm {
                    number: index + 1,
                    question: question.text().to_owned(),
                    chosen: outcome.chosen.map(|key| option_label(question, key)),
                    correct: option_label(question, outcome.correct_answer),
                    is_correct: outcome.is_correct,
                    explanation: question.explanation().map(str::to_owned),
                })
            })
            .collect();

        Self {
            title: quiz.title().to_owned(),
            correct: submission.report.correct,
            total: submission.report.total,
            percent: submission.report.percent(),
            elapsed_label: format_clock(submission.elapsed_secs),
            timed_out: submission.timed_out,
            items,
            attempt_id,
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {} correct ({}%)", self.correct, self.total, self.percent)
    }

    #[must_use]
    pub fn saved(&self) -> bool {
        self.attempt_id.is_some()
    }
}

fn option_label(question: &Question, key: OptionKey) -> String {
    match question.option(key) {
        Some(option) => format!("{key}. {}", option.text()),
        None => key.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub id: AttemptId,
    pub completed_at_str: String,
    pub score_label: String,
    pub elapsed_label: String,
    pub timed_out: bool,
}

impl From<&AttemptListItem> for AttemptRowVm {
    fn from(item: &AttemptListItem) -> Self {
        Self {
            id: item.id,
            completed_at_str: format_datetime(item.completed_at),
            score_label: format!("{} / {}", item.correct, item.total),
            elapsed_label: format_clock(item.elapsed_secs),
            timed_out: item.timed_out,
        }
    }
}

#[must_use]
pub fn map_attempt_rows(items: &[AttemptListItem]) -> Vec<AttemptRowVm> {
    items.iter().map(AttemptRowVm::from).collect()
}
