//! Local scoring of a submitted quiz.

use crate::model::{OptionKey, QuestionId, QuizData, UserAnswers};

/// Correctness of one question, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub chosen: Option<OptionKey>,
    pub correct_answer: OptionKey,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    /// Per-question correctness flags in display order.
    #[must_use]
    pub fn flags(&self) -> Vec<bool> {
        self.outcomes.iter().map(|outcome| outcome.is_correct).collect()
    }

    /// Whole-number percentage, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.correct * 200 + self.total) / (self.total * 2);
        u32::try_from(pct).unwrap_or(100)
    }
}

/// Compare recorded answers against the correct keys.
///
/// Only an exact key match counts; unanswered questions are incorrect.
/// Answers for ids the quiz does not contain are ignored.
#[must_use]
pub fn score(quiz: &QuizData, answers: &UserAnswers) -> ScoreReport {
    let outcomes: Vec<QuestionOutcome> = quiz
        .questions()
        .iter()
        .map(|question| {
            let chosen = answers.get(question.id());
            QuestionOutcome {
                question_id: question.id(),
                chosen,
                correct_answer: question.correct_answer(),
                is_correct: chosen == Some(question.correct_answer()),
            }
        })
        .collect();
    let correct = outcomes.iter().filter(|outcome| outcome.is_correct).count();

    ScoreReport {
        correct,
        total: outcomes.len(),
        outcomes,
    }
}
