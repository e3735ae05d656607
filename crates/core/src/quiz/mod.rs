mod score;
mod session;
mod summary;

pub use score::Score;
pub use session::{
    CompletionReason, QuestionReview, QuizError, QuizSession, QuizState, Step, TickOutcome,
};
pub use summary::{QuizSummary, QuizSummaryError};
