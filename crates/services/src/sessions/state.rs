use std::sync::Arc;

use quiz_core::model::{OptionKey, ProgressSnapshot, Question, QuestionId, QuizData, UserAnswers};

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining time went down by one and is still above zero.
    Ticked { remaining_secs: u32 },
    /// Time ran out on this tick. Reported exactly once per session.
    Expired,
    /// Nothing changed: already expired or frozen.
    Idle,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub position: usize,
}

/// Mutable state of one quiz attempt: position, answers and the countdown.
///
/// Remaining time only ever goes down once created, and every mutation is a
/// no-op after [`SessionState::freeze`].
#[derive(Debug, Clone)]
pub struct SessionState {
    quiz: Arc<QuizData>,
    position: usize,
    answers: UserAnswers,
    allocated_secs: u32,
    remaining_secs: u32,
    expiry_signalled: bool,
    frozen: bool,
}

impl SessionState {
    /// Fresh session: first question, no answers, full allocation.
    #[must_use]
    pub fn new(quiz: Arc<QuizData>, allocated_secs: u32) -> Self {
        Self {
            quiz,
            position: 0,
            answers: UserAnswers::new(),
            allocated_secs,
            remaining_secs: allocated_secs,
            expiry_signalled: false,
            frozen: false,
        }
    }

    /// Session rebuilt from a saved snapshot.
    ///
    /// Answers that do not match a question/option of `quiz` are dropped and the
    /// remaining time is capped at the allocation. With prior answers the
    /// position is the first unanswered question, or 0 if every question has
    /// an answer.
    #[must_use]
    pub fn resume(quiz: Arc<QuizData>, allocated_secs: u32, snapshot: &ProgressSnapshot) -> Self {
        let answers = snapshot.answers.restricted_to(&quiz);
        let position = if answers.is_empty() {
            0
        } else {
            quiz.questions()
                .iter()
                .position(|question| !answers.contains(question.id()))
                .unwrap_or(0)
        };

        Self {
            quiz,
            position,
            answers,
            allocated_secs,
            remaining_secs: snapshot.remaining_secs.min(allocated_secs),
            expiry_signalled: false,
            frozen: false,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    #[must_use]
    pub fn quiz_arc(&self) -> Arc<QuizData> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.quiz.questions()[self.position]
    }

    #[must_use]
    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<OptionKey> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn allocated_secs(&self) -> u32 {
        self.allocated_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Allocated minus remaining, floored at zero.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.allocated_secs.saturating_sub(self.remaining_secs)
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.quiz.len();
        let answered = self
            .quiz
            .questions()
            .iter()
            .filter(|question| self.answers.contains(question.id()))
            .count();
        SessionProgress {
            total,
            answered,
            unanswered: total - answered,
            position: self.position,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.answers.clone(), self.remaining_secs)
    }

    /// Record `key` for question `id`.
    ///
    /// Ignored when the question does not exist or has no such option.
    /// Returns `true` only if the stored answer changed.
    pub fn select_answer(&mut self, id: QuestionId, key: OptionKey) -> bool {
        if self.frozen {
            return false;
        }
        let valid = self
            .quiz
            .question_by_id(id)
            .is_some_and(|question| question.has_option(key));
        if !valid {
            return false;
        }
        self.answers.record(id, key)
    }

    /// Move to `index`, clamped to the last question. Returns the new position.
    pub fn set_position(&mut self, index: usize) -> usize {
        if !self.frozen {
            self.position = index.min(self.quiz.last_index());
        }
        self.position
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.frozen || self.expiry_signalled {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.expiry_signalled = true;
            return TickOutcome::Expired;
        }
        TickOutcome::Ticked {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Stop the session; time and answers no longer change.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionOption;

    fn quiz(ids: &[u64]) -> Arc<QuizData> {
        let questions = ids
            .iter()
            .map(|id| {
                Question::new(
                    QuestionId::new(*id),
                    format!("Q{id}"),
                    vec![
                        QuestionOption::new(OptionKey::A, "a"),
                        QuestionOption::new(OptionKey::B, "b"),
                        QuestionOption::new(OptionKey::C, "c"),
                    ],
                    OptionKey::A,
                    None,
                )
                .unwrap()
            })
            .collect();
        Arc::new(QuizData::new("quiz", questions, None).unwrap())
    }

    #[test]
    fn set_position_reads_back_valid_indices_and_clamps_others() {
        let mut state = SessionState::new(quiz(&[4, 8, 15, 16]), 60);
        for index in 0..4 {
            assert_eq!(state.set_position(index), index);
            assert_eq!(state.position(), index);
        }
        assert_eq!(state.set_position(4), 3);
        assert_eq!(state.set_position(usize::MAX), 3);
        assert_eq!(state.set_position(0), 0);
    }

    #[test]
    fn last_selection_wins() {
        let mut state = SessionState::new(quiz(&[1, 2]), 60);
        let id = QuestionId::new(2);
        assert!(state.select_answer(id, OptionKey::A));
        assert!(state.select_answer(id, OptionKey::C));
        assert!(!state.select_answer(id, OptionKey::C));
        assert!(state.select_answer(id, OptionKey::B));
        assert_eq!(state.answer_for(id), Some(OptionKey::B));
        assert_eq!(state.position(), 0);
        assert_eq!(state.remaining_secs(), 60);
    }

    #[test]
    fn invalid_selection_is_ignored() {
        let mut state = SessionState::new(quiz(&[1]), 60);
        assert!(!state.select_answer(QuestionId::new(1), OptionKey::D));
        assert!(!state.select_answer(QuestionId::new(9), OptionKey::A));
        assert!(state.answers().is_empty());
    }

    #[test]
    fn tick_counts_down_and_expires_once() {
        let mut state = SessionState::new(quiz(&[1]), 3);
        assert_eq!(state.tick(), TickOutcome::Ticked { remaining_secs: 2 });
        assert_eq!(state.tick(), TickOutcome::Ticked { remaining_secs: 1 });
        assert_eq!(state.tick(), TickOutcome::Expired);
        assert_eq!(state.remaining_secs(), 0);
        assert_eq!(state.elapsed_secs(), 3);
        for _ in 0..5 {
            assert_eq!(state.tick(), TickOutcome::Idle);
        }
        assert_eq!(state.remaining_secs(), 0);
    }

    #[test]
    fn resumed_at_zero_expires_on_first_tick() {
        let snapshot = ProgressSnapshot::new(UserAnswers::new(), 0);
        let mut state = SessionState::resume(quiz(&[1]), 30, &snapshot);
        assert_eq!(state.tick(), TickOutcome::Expired);
        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn frozen_state_ignores_mutations() {
        let mut state = SessionState::new(quiz(&[1, 2]), 10);
        state.tick();
        state.freeze();
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.remaining_secs(), 9);
        assert!(!state.select_answer(QuestionId::new(1), OptionKey::A));
        assert_eq!(state.set_position(1), 0);
    }

    #[test]
    fn resume_starts_at_first_unanswered_question() {
        let answers: UserAnswers = [(QuestionId::new(1), OptionKey::A)].into_iter().collect();
        let snapshot = ProgressSnapshot::new(answers, 42);
        let state = SessionState::resume(quiz(&[1, 2, 3]), 60, &snapshot);
        assert_eq!(state.position(), 1);
        assert_eq!(state.remaining_secs(), 42);
        assert_eq!(state.elapsed_secs(), 18);
    }

    #[test]
    fn resume_with_everything_answered_starts_at_zero() {
        let answers: UserAnswers = [
            (QuestionId::new(1), OptionKey::A),
            (QuestionId::new(2), OptionKey::B),
        ]
        .into_iter()
        .collect();
        let state = SessionState::resume(quiz(&[1, 2]), 60, &ProgressSnapshot::new(answers, 5));
        assert_eq!(state.position(), 0);
        assert_eq!(state.progress().unanswered, 0);
    }

    #[test]
    fn resume_drops_stale_answers_and_caps_time() {
        let answers: UserAnswers = [
            (QuestionId::new(1), OptionKey::D),
            (QuestionId::new(77), OptionKey::A),
        ]
        .into_iter()
        .collect();
        let state =
            SessionState::resume(quiz(&[1, 2]), 60, &ProgressSnapshot::new(answers, 500));
        assert!(state.answers().is_empty());
        assert_eq!(state.position(), 0);
        assert_eq!(state.remaining_secs(), 60);
    }
}
