use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{DifficultyFilter, LanguageId};
use crate::quiz::{CompletionReason, QuizSession, Score};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("quiz is not completed")]
    NotCompleted,
}

/// Aggregate outcome of a completed quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    language: LanguageId,
    filter: DifficultyFilter,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    reason: CompletionReason,
    score: Score,
    answered: usize,
    elapsed_secs: u32,
    passed: bool,
}

impl QuizSummary {
    /// Build a summary from a completed session.
    ///
    /// `started_at`/`completed_at` come from the host's clock; the session itself
    /// only tracks the countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::NotCompleted` if the session is still open and
    /// `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_session(
        session: &QuizSession,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        pass_threshold: u8,
    ) -> Result<Self, QuizSummaryError> {
        let reason = session
            .completion_reason()
            .ok_or(QuizSummaryError::NotCompleted)?;
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        let score = session.score();

        Ok(Self {
            language: session.language().clone(),
            filter: session.filter(),
            started_at,
            completed_at,
            reason,
            score,
            answered: session.answered_count(),
            elapsed_secs: session.elapsed_secs(),
            passed: score.is_passing(pass_threshold),
        })
    }

    #[must_use]
    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    #[must_use]
    pub fn filter(&self) -> DifficultyFilter {
        self.filter
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn reason(&self) -> CompletionReason {
        self.reason
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Countdown seconds consumed by the attempt.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }
}
