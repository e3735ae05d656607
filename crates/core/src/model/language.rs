use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LanguageId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageError {
    #[error("language id cannot be empty")]
    EmptyId,

    #[error("language name cannot be empty")]
    EmptyName,
}

/// A language offered by the catalog, with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    id: LanguageId,
    name: String,
}

impl Language {
    /// Create a language entry.
    ///
    /// # Errors
    ///
    /// Returns `LanguageError` if the id or the trimmed name is empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, LanguageError> {
        let id = LanguageId::new(id).map_err(|_| LanguageError::EmptyId)?;
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LanguageError::EmptyName);
        }
        Ok(Self { id, name })
    }

    #[must_use]
    pub fn id(&self) -> &LanguageId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
