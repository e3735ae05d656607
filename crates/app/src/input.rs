use std::fmt;

use quiz_core::model::{DifficultyFilter, OPTION_COUNT};

/// A line of user input, interpreted as a quiz action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Start,
    Select(usize),
    Next,
    Previous,
    Filter(DifficultyFilter),
    Restart,
    Show,
    Languages,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    Unknown(String),
    InvalidFilter(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "type a command, or `h` for help"),
            InputError::Unknown(raw) => write!(f, "unknown command: {raw}"),
            InputError::InvalidFilter(raw) => write!(
                f,
                "unknown difficulty: {raw} (expected all, beginner, intermediate or oop)"
            ),
        }
    }
}

impl std::error::Error for InputError {}

impl Input {
    /// Parse one line of input.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for blank or unrecognized lines.
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(InputError::Empty);
        };
        let head = head.to_lowercase();

        if head.len() == 1 {
            if let Some(index) = option_index(head.as_bytes()[0]) {
                return Ok(Self::Select(index));
            }
        }

        match head.as_str() {
            "s" | "start" => Ok(Self::Start),
            "n" | "next" | "finish" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "r" | "restart" | "retry" => Ok(Self::Restart),
            "t" | "show" => Ok(Self::Show),
            "l" | "languages" => Ok(Self::Languages),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "f" | "filter" => {
                let raw = parts.next().unwrap_or_default();
                raw.parse()
                    .map(Self::Filter)
                    .map_err(|_| InputError::InvalidFilter(raw.to_string()))
            }
            _ => Err(InputError::Unknown(line.to_string())),
        }
    }
}

fn option_index(byte: u8) -> Option<usize> {
    let index = usize::from(byte.checked_sub(b'a')?);
    (index < OPTION_COUNT).then_some(index)
}

pub const HELP: &str = "\
Commands:
  s            start the quiz
  a b c d      select an answer
  n            next question (finish on the last one)
  p            previous question
  f <level>    difficulty: all, beginner, intermediate, oop
  r            back to the start screen
  t            show the current screen again
  l            list languages
  q            quit";
