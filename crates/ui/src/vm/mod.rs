mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use quiz_vm::{IndexItemVm, OptionVm, QuestionVm, QuizVm};
pub use results_vm::{AttemptRowVm, FeedbackVm, ResultsVm, map_attempt_rows};
pub use time_fmt::{format_clock, format_datetime};
