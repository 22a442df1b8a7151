use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::QuestionId;
use crate::model::question::OptionKey;
use crate::model::quiz::QuizData;

/// Selected option per question.
///
/// Entries are never removed during a session; a later selection for the same
/// question overwrites the earlier one. Iteration is ordered by question id,
/// so snapshots and scoring never depend on the order answers were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAnswers(BTreeMap<QuestionId, OptionKey>);

impl UserAnswers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` for `id`. Returns `true` if the stored value changed.
    pub fn record(&mut self, id: QuestionId, key: OptionKey) -> bool {
        self.0.insert(id, key) != Some(key)
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<OptionKey> {
        self.0.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, OptionKey)> + '_ {
        self.0.iter().map(|(id, key)| (*id, *key))
    }

    /// Keep only entries that name a question of `quiz` and one of its option keys.
    #[must_use]
    pub fn restricted_to(&self, quiz: &QuizData) -> Self {
        self.iter()
            .filter(|(id, key)| {
                quiz.question_by_id(*id)
                    .is_some_and(|question| question.has_option(*key))
            })
            .collect()
    }
}

impl FromIterator<(QuestionId, OptionKey)> for UserAnswers {
    fn from_iter<T: IntoIterator<Item = (QuestionId, OptionKey)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
