use quiz_core::quiz::{QuizSession, QuizState};

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub state: QuizState,
    pub total: usize,
    /// 0-based index of the current question.
    pub position: usize,
    pub answered: usize,
    pub remaining_secs: u32,
    pub percent: u8,
}

impl From<&QuizSession> for QuizProgress {
    fn from(session: &QuizSession) -> Self {
        Self {
            state: session.state(),
            total: session.len(),
            position: session.position(),
            answered: session.answered_count(),
            remaining_secs: session.remaining_secs(),
            percent: session.progress_percent(),
        }
    }
}
