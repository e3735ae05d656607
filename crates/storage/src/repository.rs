use async_trait::async_trait;
use quiz_core::model::{Language, LanguageId, Question};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by catalog adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read-only source of quiz questions, keyed by language.
#[async_trait]
pub trait QuestionCatalog: Send + Sync {
    /// Languages offered by the catalog, in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn languages(&self) -> Result<Vec<Language>, StorageError>;

    /// Fetch a single language entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the language is not in the catalog.
    async fn language(&self, id: &LanguageId) -> Result<Language, StorageError> {
        self.languages()
            .await?
            .into_iter()
            .find(|language| language.id() == id)
            .ok_or(StorageError::NotFound)
    }

    /// Questions for a language, in catalog order. Unknown languages yield an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn questions(&self, language: &LanguageId) -> Result<Vec<Question>, StorageError>;
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    language: Language,
    questions: Vec<Question>,
}

/// In-memory catalog, used for the built-in sample data and for tests.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    entries: Arc<Mutex<Vec<CatalogEntry>>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a language with its questions. Languages keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the language is already present or a
    /// question id is used twice within the catalog.
    pub fn insert_language(
        &self,
        language: Language,
        questions: Vec<Question>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if guard.iter().any(|entry| entry.language.id() == language.id()) {
            return Err(StorageError::Conflict(format!(
                "duplicate language {}",
                language.id()
            )));
        }

        let duplicate = {
            let mut seen = HashSet::new();
            guard
                .iter()
                .flat_map(|entry| entry.questions.iter())
                .chain(questions.iter())
                .find(|question| !seen.insert(question.id().clone()))
                .map(|question| question.id().to_string())
        };
        if let Some(id) = duplicate {
            return Err(StorageError::Conflict(format!("duplicate question id {id}")));
        }

        guard.push(CatalogEntry {
            language,
            questions,
        });
        Ok(())
    }
}

#[async_trait]
impl QuestionCatalog for InMemoryCatalog {
    async fn languages(&self) -> Result<Vec<Language>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().map(|entry| entry.language.clone()).collect())
    }

    async fn questions(&self, language: &LanguageId) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .find(|entry| entry.language.id() == language)
            .map(|entry| entry.questions.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;

    fn build_question(id: &str) -> Question {
        Question::new(id, "Q", ["a", "b", "c", "d"], 0, Difficulty::Beginner, "").unwrap()
    }

    #[tokio::test]
    async fn returns_questions_in_insertion_order() {
        let catalog = InMemoryCatalog::new();
        let rust = Language::new("rust", "Rust").unwrap();
        catalog
            .insert_language(rust.clone(), vec![build_question("rs-1"), build_question("rs-2")])
            .unwrap();

        let questions = catalog.questions(rust.id()).await.unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["rs-1", "rs-2"]);
        assert_eq!(catalog.language(rust.id()).await.unwrap().name(), "Rust");
    }

    #[tokio::test]
    async fn unknown_language_is_empty() {
        let catalog = InMemoryCatalog::new();
        let missing = LanguageId::new("cobol").unwrap();
        assert!(catalog.questions(&missing).await.unwrap().is_empty());
        assert!(matches!(
            catalog.language(&missing).await,
            Err(StorageError::NotFound)
        ));
    }

    #[test]
    fn rejects_duplicate_language_and_question_ids() {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert_language(Language::new("go", "Go").unwrap(), vec![build_question("x")])
            .unwrap();

        let dup_lang = catalog.insert_language(Language::new("GO", "Go").unwrap(), Vec::new());
        assert!(matches!(dup_lang, Err(StorageError::Conflict(_))));

        let dup_question = catalog.insert_language(
            Language::new("zig", "Zig").unwrap(),
            vec![build_question("x")],
        );
        assert!(matches!(dup_question, Err(StorageError::Conflict(_))));
    }
}
