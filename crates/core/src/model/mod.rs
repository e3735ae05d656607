mod ids;
mod language;
mod question;
mod settings;

pub use ids::{LanguageId, ParseIdError, QuestionId};
pub use language::{Language, LanguageError};
pub use question::{
    Difficulty, DifficultyFilter, OPTION_COUNT, Question, QuestionDraft, QuestionError,
};
pub use settings::{
    DEFAULT_DURATION_SECS, DEFAULT_PASS_THRESHOLD, DEFAULT_URGENT_SECS, QuizSettings,
    QuizSettingsDraft, QuizSettingsError,
};
