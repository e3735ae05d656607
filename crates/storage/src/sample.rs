//! Built-in sample questions for the default languages.

use quiz_core::model::{Difficulty, Language, OPTION_COUNT, Question};

use crate::repository::{InMemoryCatalog, StorageError};

struct SampleQuestion {
    id: &'static str,
    question: &'static str,
    options: [&'static str; OPTION_COUNT],
    correct: usize,
    difficulty: Difficulty,
    explanation: &'static str,
}

const PYTHON: &[SampleQuestion] = &[
    SampleQuestion {
        id: "py-q1",
        question: "Which of the following is the correct way to create a variable in Python?",
        options: ["var x = 5", "x = 5", "int x = 5", "x := 5"],
        correct: 1,
        difficulty: Difficulty::Beginner,
        explanation: "In Python, you create variables by simply assigning a value using the = operator.",
    },
    SampleQuestion {
        id: "py-q2",
        question: "What is the output of: print(type([1, 2, 3]))?",
        options: ["<class 'array'>", "<class 'list'>", "<class 'tuple'>", "<class 'dict'>"],
        correct: 1,
        difficulty: Difficulty::Beginner,
        explanation: "Lists in Python are of type 'list', which is displayed as <class 'list'>.",
    },
    SampleQuestion {
        id: "py-q3",
        question: "Which method is used to add an element to the end of a list?",
        options: ["add()", "append()", "insert()", "push()"],
        correct: 1,
        difficulty: Difficulty::Intermediate,
        explanation: "The append() method adds an element to the end of a list in Python.",
    },
    SampleQuestion {
        id: "py-q4",
        question: "What is inheritance in Object-Oriented Programming?",
        options: [
            "A way to hide data",
            "A way to create multiple objects",
            "A way for a class to inherit properties from another class",
            "A way to delete objects",
        ],
        correct: 2,
        difficulty: Difficulty::Oop,
        explanation: "Inheritance allows a class to inherit attributes and methods from a parent class.",
    },
    SampleQuestion {
        id: "py-q5",
        question: "What does the 'self' parameter represent in Python class methods?",
        options: [
            "The class itself",
            "The current instance of the class",
            "A static variable",
            "The parent class",
        ],
        correct: 1,
        difficulty: Difficulty::Oop,
        explanation: "'self' refers to the current instance of the class and is used to access instance variables and methods.",
    },
];

const JAVASCRIPT: &[SampleQuestion] = &[
    SampleQuestion {
        id: "js-q1",
        question: "Which of the following is used to declare a constant in JavaScript?",
        options: ["var", "let", "const", "final"],
        correct: 2,
        difficulty: Difficulty::Beginner,
        explanation: "The 'const' keyword is used to declare constants in JavaScript.",
    },
    SampleQuestion {
        id: "js-q2",
        question: "What is the result of: typeof null?",
        options: ["'null'", "'undefined'", "'object'", "'boolean'"],
        correct: 2,
        difficulty: Difficulty::Intermediate,
        explanation: "This is a known quirk in JavaScript - typeof null returns 'object'.",
    },
];

const HTML5: &[SampleQuestion] = &[SampleQuestion {
    id: "html-q1",
    question: "Which HTML5 element is used to define navigation links?",
    options: ["<navigation>", "<nav>", "<menu>", "<links>"],
    correct: 1,
    difficulty: Difficulty::Beginner,
    explanation: "The <nav> element is used to define a section of navigation links.",
}];

const CSS3: &[SampleQuestion] = &[SampleQuestion {
    id: "css-q1",
    question: "Which CSS property is used to create flexible layouts?",
    options: ["display: block", "display: flex", "display: inline", "display: table"],
    correct: 1,
    difficulty: Difficulty::Intermediate,
    explanation: "display: flex creates a flexible layout container using Flexbox.",
}];

const LANGUAGES: &[(&str, &str, &[SampleQuestion])] = &[
    ("python", "Python", PYTHON),
    ("javascript", "JavaScript", JAVASCRIPT),
    ("html5", "HTML5", HTML5),
    ("css3", "CSS3", CSS3),
];

/// Build an in-memory catalog seeded with the sample questions.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if a sample entry fails validation.
pub fn sample_catalog() -> Result<InMemoryCatalog, StorageError> {
    let catalog = InMemoryCatalog::new();
    for (id, name, samples) in LANGUAGES {
        let language =
            Language::new(*id, *name).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let questions = samples
            .iter()
            .map(|sample| {
                Question::new(
                    sample.id,
                    sample.question,
                    sample.options,
                    sample.correct,
                    sample.difficulty,
                    sample.explanation,
                )
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", sample.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        catalog.insert_language(language, questions)?;
    }
    Ok(catalog)
}
