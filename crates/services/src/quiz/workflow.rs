use std::sync::Arc;

use quiz_core::model::{DifficultyFilter, Language, LanguageId, QuizSettings};
use quiz_core::quiz::QuizSession;
use storage::QuestionCatalog;
use tokio::sync::mpsc;

use super::host::{HostEvent, QuizHost};
use crate::Clock;
use crate::error::QuizServiceError;

/// Builds quiz sessions from an injected question catalog.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    catalog: Arc<dyn QuestionCatalog>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, settings: QuizSettings, catalog: Arc<dyn QuestionCatalog>) -> Self {
        Self {
            clock,
            settings,
            catalog,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Languages offered by the catalog.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the catalog cannot be read.
    pub async fn languages(&self) -> Result<Vec<Language>, QuizServiceError> {
        Ok(self.catalog.languages().await?)
    }

    /// Look up a language entry by id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` with `StorageError::NotFound` for an
    /// unknown language.
    pub async fn language(&self, id: &LanguageId) -> Result<Language, QuizServiceError> {
        Ok(self.catalog.language(id).await?)
    }

    /// Create a not-yet-started session for a language and difficulty.
    ///
    /// A language without questions produces an empty session whose `start`
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the catalog cannot be read.
    pub async fn open_session(
        &self,
        language: &LanguageId,
        filter: DifficultyFilter,
    ) -> Result<QuizSession, QuizServiceError> {
        let questions = self.catalog.questions(language).await?;
        if questions.is_empty() {
            log::warn!("no questions in catalog for language {language}");
        }
        let session = QuizSession::new(language.clone(), questions, filter, &self.settings);
        log::debug!(
            "opened quiz session: language={language} filter={filter} questions={}",
            session.len()
        );
        Ok(session)
    }

    /// Open a session and wrap it in a host that owns its countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the catalog cannot be read.
    pub async fn open_host(
        &self,
        language: &LanguageId,
        filter: DifficultyFilter,
    ) -> Result<(QuizHost, mpsc::UnboundedReceiver<HostEvent>), QuizServiceError> {
        let session = self.open_session(language, filter).await?;
        Ok(QuizHost::new(session, self.settings, self.clock))
    }
}
