#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_loader;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, AttemptServiceError, QuizLoadError, SessionError};
pub use quiz_loader::{load_quiz_from_path, quiz_from_str, quiz_key_for_path};

pub use sessions::{
    AttemptHistoryService, AttemptId, AttemptListItem, InputEvent, NavKey, QuizLoopService,
    QuizSession, SessionEvent, Submission, TimerDriver, TimerHandle,
};
