use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has empty text")]
    EmptyText { id: QuestionId },

    #[error("question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("invalid option key: {raw:?}")]
    InvalidKey { raw: String },

    #[error("question {id} repeats option key {key}")]
    DuplicateKey { id: QuestionId, key: OptionKey },

    #[error("question {id} marks {key} correct but has no such option")]
    UnknownCorrectKey { id: QuestionId, key: OptionKey },
}

//
// ─── OPTION KEY ───────────────────────────────────────────────────────────────
//

/// Single-letter option label, always stored upper case.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionKey(char);

impl OptionKey {
    pub const A: OptionKey = OptionKey('A');
    pub const B: OptionKey = OptionKey('B');
    pub const C: OptionKey = OptionKey('C');
    pub const D: OptionKey = OptionKey('D');

    /// Build a key from a single ASCII letter, case-insensitively.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    /// Parse a key from text such as `"b"` or `" C "`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidKey` unless the trimmed input is one ASCII letter.
    pub fn parse(raw: &str) -> Result<Self, QuestionError> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| QuestionError::InvalidKey {
            raw: raw.to_owned(),
        })
    }

    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<String> for OptionKey {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OptionKey> for String {
    fn from(key: OptionKey) -> Self {
        key.0.to_string()
    }
}

impl fmt::Debug for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionKey({})", self.0)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    key: OptionKey,
    text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(key: OptionKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> OptionKey {
        self.key
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Unvalidated question as it arrives from the extraction step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: u64,
    #[serde(alias = "text")]
    pub question: String,
    pub options: Vec<OptionDraft>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionDraft {
    pub key: String,
    pub text: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for blank text, missing or duplicate options,
    /// malformed keys, or a correct answer that names no option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id);
        let text = self.question.trim().to_owned();
        if text.is_empty() {
            return Err(QuestionError::EmptyText { id });
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions { id });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        let mut options = Vec::with_capacity(self.options.len());
        for draft in self.options {
            let key = OptionKey::parse(&draft.key)?;
            if !seen.insert(key) {
                return Err(QuestionError::DuplicateKey { id, key });
            }
            options.push(QuestionOption::new(key, draft.text.trim()));
        }

        let correct_answer = OptionKey::parse(&self.correct_answer)?;
        if !seen.contains(&correct_answer) {
            return Err(QuestionError::UnknownCorrectKey {
                id,
                key: correct_answer,
            });
        }

        let explanation = self
            .explanation
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Question {
            id,
            text,
            options,
            correct_answer,
            explanation,
        })
    }
}

/// A multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<QuestionOption>,
    correct_answer: OptionKey,
    explanation: Option<String>,
}

impl Question {
    /// Build a question from already-typed parts.
    ///
    /// # Errors
    ///
    /// Same rules as [`QuestionDraft::validate`].
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<QuestionOption>,
        correct_answer: OptionKey,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            id: id.value(),
            question: text.into(),
            options: options
                .into_iter()
                .map(|option| OptionDraft {
                    key: option.key.to_string(),
                    text: option.text,
                })
                .collect(),
            correct_answer: correct_answer.to_string(),
            explanation,
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> OptionKey {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn has_option(&self, key: OptionKey) -> bool {
        self.options.iter().any(|option| option.key == key)
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.key == key)
    }
}
