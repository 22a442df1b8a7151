mod answers;
mod attempt;
mod ids;
mod question;
mod quiz;
mod settings;
mod snapshot;

pub use ids::{ParseIdError, QuestionId, QuizKey, SessionId};

pub use answers::UserAnswers;
pub use attempt::{AttemptError, AttemptRecord};
pub use question::{OptionDraft, OptionKey, Question, QuestionDraft, QuestionError, QuestionOption};
pub use quiz::{QuizData, QuizDraft, QuizError, UNTITLED_QUIZ};
pub use settings::{DEFAULT_SECS_PER_QUESTION, QuizSettings, QuizSettingsDraft, QuizSettingsError};
pub use snapshot::ProgressSnapshot;
