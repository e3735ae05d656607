//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::quiz::{QuizError, QuizSummaryError};
use storage::StorageError;

/// Errors emitted by the quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("quiz session state is unavailable")]
    Poisoned,
}
