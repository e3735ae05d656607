mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{QuestionVm, QuizIntroVm, QuizResultsVm, map_intro, map_question, map_results};
#[cfg(test)]
pub use quiz_vm::{FilterPillVm, OptionVm, ReviewRowVm};
pub use time_fmt::format_countdown;
