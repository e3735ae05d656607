use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{DifficultyFilter, LanguageId, QuizSettings, QuizSettingsDraft};

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidLanguage { raw: String },
    InvalidDifficulty { raw: String },
    InvalidDuration { raw: String },
    InvalidCatalog { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid --language value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
            ArgsError::InvalidDuration { raw } => write!(f, "invalid --duration value: {raw}"),
            ArgsError::InvalidCatalog { raw } => write!(f, "invalid --catalog value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quiz,
    Languages,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "languages" => Some(Self::Languages),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Args {
    pub command: Command,
    pub language: LanguageId,
    pub filter: DifficultyFilter,
    pub settings: QuizSettings,
    pub catalog: Option<PathBuf>,
}

/// Environment fallbacks; flags win over these.
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub language: Option<String>,
    pub difficulty: Option<String>,
    pub duration: Option<String>,
    pub catalog: Option<String>,
}

impl EnvDefaults {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            language: std::env::var("QUIZ_LANGUAGE").ok(),
            difficulty: std::env::var("QUIZ_DIFFICULTY").ok(),
            duration: std::env::var("QUIZ_DURATION_SECS").ok(),
            catalog: std::env::var("QUIZ_CATALOG").ok(),
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [quiz] [--language <id>] [--difficulty <all|beginner|intermediate|oop>]");
    eprintln!("             [--duration <secs>] [--catalog <path.json>]");
    eprintln!("  app languages [--catalog <path.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --language python --difficulty all --duration 1200");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_LANGUAGE, QUIZ_DIFFICULTY, QUIZ_DURATION_SECS, QUIZ_CATALOG, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_language(raw: String) -> Result<LanguageId, ArgsError> {
    LanguageId::new(raw.as_str()).map_err(|_| ArgsError::InvalidLanguage { raw })
}

fn parse_filter(raw: String) -> Result<DifficultyFilter, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidDifficulty { raw })
}

fn parse_duration(raw: String) -> Result<u32, ArgsError> {
    let parsed = raw.trim().parse::<u32>();
    match parsed {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ArgsError::InvalidDuration { raw }),
    }
}

fn parse_catalog(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidCatalog { raw });
    }
    Ok(PathBuf::from(raw.trim()))
}

impl Args {
    /// Parse the command line (without the program name) over environment defaults.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values, or invalid values.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: EnvDefaults,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek().map(String::as_str) {
            None => Command::Quiz,
            Some("--help" | "-h") => Command::Help,
            Some(first) if first.starts_with("--") => Command::Quiz,
            Some(first) => {
                let cmd = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                args.next();
                cmd
            }
        };

        let mut language = env.language.map(parse_language).transpose()?;
        let mut filter = env.difficulty.map(parse_filter).transpose()?;
        let mut duration = env.duration.map(parse_duration).transpose()?;
        let mut catalog = env.catalog.map(parse_catalog).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--language" => {
                    language = Some(parse_language(require_value(&mut args, "--language")?)?);
                }
                "--difficulty" => {
                    filter = Some(parse_filter(require_value(&mut args, "--difficulty")?)?);
                }
                "--duration" => {
                    duration = Some(parse_duration(require_value(&mut args, "--duration")?)?);
                }
                "--catalog" => {
                    catalog = Some(parse_catalog(require_value(&mut args, "--catalog")?)?);
                }
                "--help" | "-h" => return Self::defaults(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = QuizSettingsDraft {
            duration_secs: duration,
            ..QuizSettingsDraft::default()
        }
        .validate()
        .map_err(|e| ArgsError::InvalidDuration { raw: e.to_string() })?;

        let language = match language {
            Some(language) => language,
            None => default_language()?,
        };

        Ok(Self {
            command,
            language,
            filter: filter.unwrap_or_default(),
            settings,
            catalog,
        })
    }

    fn defaults(command: Command) -> Result<Self, ArgsError> {
        Ok(Self {
            command,
            language: default_language()?,
            filter: DifficultyFilter::All,
            settings: QuizSettings::default(),
            catalog: None,
        })
    }
}

fn default_language() -> Result<LanguageId, ArgsError> {
    parse_language("python".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let args = Args::parse(Vec::new(), EnvDefaults::default()).unwrap();
        assert_eq!(args.command, Command::Quiz);
        assert_eq!(args.language.as_str(), "python");
        assert_eq!(args.filter, DifficultyFilter::All);
        assert_eq!(args.settings.duration_secs(), 1200);
        assert!(args.catalog.is_none());
    }

    #[test]
    fn flags_override_environment() {
        let env = EnvDefaults {
            language: Some("css3".into()),
            difficulty: Some("beginner".into()),
            duration: Some("60".into()),
            catalog: None,
        };
        let args = Args::parse(
            argv(&["quiz", "--language", "JavaScript", "--duration", "300"]),
            env,
        )
        .unwrap();
        assert_eq!(args.language.as_str(), "javascript");
        assert_eq!(args.filter, DifficultyFilter::Only(Difficulty::Beginner));
        assert_eq!(args.settings.duration_secs(), 300);
    }

    #[test]
    fn languages_subcommand() {
        let args =
            Args::parse(argv(&["languages", "--catalog", "qs.json"]), EnvDefaults::default())
                .unwrap();
        assert_eq!(args.command, Command::Languages);
        assert_eq!(args.catalog, Some(PathBuf::from("qs.json")));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Args::parse(argv(&["--duration", "0"]), EnvDefaults::default()),
            Err(ArgsError::InvalidDuration { .. })
        ));
        assert!(matches!(
            Args::parse(argv(&["--difficulty", "expert"]), EnvDefaults::default()),
            Err(ArgsError::InvalidDifficulty { .. })
        ));
        assert!(matches!(
            Args::parse(argv(&["--language"]), EnvDefaults::default()),
            Err(ArgsError::MissingValue { flag: "--language" })
        ));
        assert!(matches!(
            Args::parse(argv(&["play"]), EnvDefaults::default()),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["--verbose"]), EnvDefaults::default()),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn help_flag_short_circuits() {
        let args = Args::parse(argv(&["-h"]), EnvDefaults::default()).unwrap();
        assert_eq!(args.command, Command::Help);
    }
}
