use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have exactly {OPTION_COUNT} options, got {0}")]
    OptionCount(usize),

    #[error("correct answer index {0} is out of range")]
    CorrectAnswerOutOfRange(usize),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tag attached to each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    #[serde(rename = "OOP")]
    Oop,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Oop];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Oop => "OOP",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "oop" => Ok(Self::Oop),
            other => Err(QuestionError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Which questions of a language take part in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Filter choices in display order.
    pub const CHOICES: [DifficultyFilter; 4] = [
        Self::All,
        Self::Only(Difficulty::Beginner),
        Self::Only(Difficulty::Intermediate),
        Self::Only(Difficulty::Oop),
    ];

    #[must_use]
    pub fn matches(self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Only(difficulty) => question.difficulty() == difficulty,
        }
    }

    /// Returns the questions kept by this filter, preserving catalog order.
    #[must_use]
    pub fn apply(self, questions: &[Question]) -> Vec<Question> {
        questions
            .iter()
            .filter(|question| self.matches(question))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(difficulty) => difficulty.label(),
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyFilter {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id or prompt is blank, the option count
    /// is not `OPTION_COUNT`, or the correct index does not point at an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id).map_err(|_| QuestionError::EmptyId)?;
        let prompt = self.question.trim();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|rejected: Vec<String>| QuestionError::OptionCount(rejected.len()))?;
        if self.correct_answer >= OPTION_COUNT {
            return Err(QuestionError::CorrectAnswerOutOfRange(self.correct_answer));
        }

        Ok(Question {
            id,
            prompt: prompt.to_string(),
            options,
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
            explanation: self.explanation.trim().to_string(),
        })
    }
}

/// A multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_answer: usize,
    difficulty: Difficulty,
    explanation: String,
}

impl Question {
    /// Build a question from its parts.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_answer: usize,
        difficulty: Difficulty,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            id: id.into(),
            question: prompt.into(),
            options: options.iter().map(|opt| (*opt).to_string()).collect(),
            correct_answer,
            difficulty,
            explanation: explanation.into(),
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer
    }

    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            id: self.id.to_string(),
            question: self.prompt.clone(),
            options: self.options.to_vec(),
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
            explanation: self.explanation.clone(),
        }
    }
}
