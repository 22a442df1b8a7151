use serde::{Deserialize, Serialize};

use crate::model::answers::UserAnswers;

/// Answers plus remaining time, persisted so a session can be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub answers: UserAnswers,
    pub remaining_secs: u32,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(answers: UserAnswers, remaining_secs: u32) -> Self {
        Self {
            answers,
            remaining_secs,
        }
    }
}
