//! JSON-backed catalog documents.
//!
//! A document lists languages in display order, each carrying its questions:
//!
//! ```json
//! { "languages": [ { "id": "python", "name": "Python", "questions": [ ... ] } ] }
//! ```

use std::path::Path;

use quiz_core::model::{Language, QuestionDraft};
use serde::{Deserialize, Serialize};

use crate::repository::{InMemoryCatalog, StorageError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub languages: Vec<LanguageDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

impl CatalogDocument {
    /// Validate every entry and build a catalog from the document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for invalid languages or questions and
    /// `StorageError::Conflict` for duplicate ids.
    pub fn into_catalog(self) -> Result<InMemoryCatalog, StorageError> {
        let catalog = InMemoryCatalog::new();
        for entry in self.languages {
            let language = Language::new(entry.id, entry.name)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let questions = entry
                .questions
                .into_iter()
                .map(|draft| {
                    let id = draft.id.clone();
                    draft
                        .validate()
                        .map_err(|e| StorageError::Serialization(format!("question {id}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            catalog.insert_language(language, questions)?;
        }
        Ok(catalog)
    }
}

/// Parse a catalog from a JSON string.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or invalid entries.
pub fn catalog_from_str(raw: &str) -> Result<InMemoryCatalog, StorageError> {
    let document: CatalogDocument =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    document.into_catalog()
}

/// Load a catalog from a JSON file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, or the errors of
/// [`catalog_from_str`].
pub fn catalog_from_path(path: impl AsRef<Path>) -> Result<InMemoryCatalog, StorageError> {
    let raw = std::fs::read_to_string(path)?;
    catalog_from_str(&raw)
}
